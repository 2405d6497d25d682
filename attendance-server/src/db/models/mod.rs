//! Database Models

pub mod serde_helpers;

pub mod attendance;
pub mod department;
pub mod employee;
pub mod lunch_time;
pub mod notification;
pub mod role;
pub mod task;

pub use attendance::{
    AttendanceCreate, AttendancePage, AttendancePageQuery, AttendanceRecord, AttendanceType,
};
pub use department::{Department, DepartmentCreate, DepartmentUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate};
pub use lunch_time::{
    LunchTime, LunchTimeCreate, LunchTimeFields, LunchTimeQuery, LunchTimeUpdate, WEEKDAYS,
};
pub use notification::{Notification, NotificationCreate, NotificationQuery};
pub use role::{Role, RoleCreate, RolePermissions, RoleUpdate};
pub use task::{
    NewTask, ProgressCreate, ProgressUpdate, Task, TaskChanges, TaskCreate, TaskPriority,
    TaskQuery, TaskStatus, TaskUpdate,
};

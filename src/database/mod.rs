pub mod manager;
pub mod staffing;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use staffing::{PgStaffingStore, StaffingStore};
pub use users::{PgUserDirectory, UserDirectory};

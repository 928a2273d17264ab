use crate::core::domain::Identifiable;
use crate::core::exchange::BookStatus;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn status(&self) -> BookStatus;
    // ownership is strict string equality on the stored owner id
    fn owned_by(&self, user_id: &str) -> bool;
}

pub use super::todo::Entity as Todo;
pub use super::user::Entity as User;

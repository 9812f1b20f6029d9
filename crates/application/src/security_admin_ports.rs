mod repositories;
mod roles;

pub use repositories::RoleRepository;
pub use roles::{AssignRoleInput, CreateRoleInput, UpdateRoleInput};

pub mod guards;
pub mod health;
pub mod overrides;
pub mod permissions;

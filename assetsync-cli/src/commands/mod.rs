pub mod component;
pub mod list;
pub mod publish;
pub mod refresh;

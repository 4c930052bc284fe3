pub mod publish;
pub mod task;

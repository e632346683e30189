pub mod link_repository;
#[cfg(test)]
pub mod memory_link_repository;
pub mod mongo_link_repository;

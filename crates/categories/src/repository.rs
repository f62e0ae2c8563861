//! Storage contract for categories.

use catalog_core::Repository;

use crate::category::Category;

/// Category-bound repository contract.
///
/// Any backend implementing the shared [`Repository`] contract for [`Category`]
/// satisfies it; concrete implementations live in the infrastructure layer.
pub trait CategoryRepository: Repository<Category> {}

impl<T> CategoryRepository for T where T: Repository<Category> {}

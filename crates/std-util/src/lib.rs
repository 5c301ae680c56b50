pub mod option;
pub mod result;

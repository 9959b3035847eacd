pub mod proceeds;

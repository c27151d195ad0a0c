/// CRUD operations tests for the user and property entities
pub mod crud_tests;

pub mod handler;
pub mod my_aws;
pub mod resolvers;
pub mod schema;
pub mod store;
pub mod types;

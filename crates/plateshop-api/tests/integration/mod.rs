mod admin;
mod auth;

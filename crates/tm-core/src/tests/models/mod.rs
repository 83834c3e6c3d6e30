mod environment;
mod identity;
mod profile;
mod role;
mod session_state;

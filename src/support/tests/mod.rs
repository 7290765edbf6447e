mod authorization;
mod common;
mod recommendation;

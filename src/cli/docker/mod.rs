//! Container engine integration.
//!
//! Jekyll runs in a container built from the project's `Dockerfile`. The
//! project directory is bind-mounted at `/srv/jekyll` and the container runs
//! as the configured numeric user so generated files stay owned by the
//! developer.
//!
//! # Module Structure
//!
//! - `engine` - Handle on the engine executable
//! - `image` - Engine discovery, image build and removal
//! - `container_runner` - Run arguments, existence checks, stop/remove

pub mod container_runner;
pub mod engine;
pub mod image;

pub use container_runner::{ContainerSpec, RunMode, container_exists, serve_command, stop_and_remove};
pub use engine::{Engine, argv};

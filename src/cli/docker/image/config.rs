//! Container layout constants shared by image and container operations.

/// Fixed name of the server container
pub const CONTAINER_NAME: &str = "jekyll-serve";

/// Mount point of the project inside the container
pub const SITE_PATH: &str = "/srv/jekyll";

/// Port `jekyll serve` listens on inside the container
pub const CONTAINER_PORT: u16 = 4000;

/// Environment shared by every container run.
///
/// Keeps bundler state inside the mounted project so it is writable by the
/// invoking user.
pub const CONTAINER_ENV: [(&str, &str); 3] = [
    ("BUNDLE_APP_CONFIG", "/srv/jekyll/.bundle"),
    ("BUNDLE_PATH", "/srv/jekyll/vendor/bundle"),
    ("HOME", "/tmp"),
];

/// Platform-specific engine installation instructions
#[cfg(target_os = "macos")]
pub const ENGINE_INSTALL_HELP: &str =
    "Install Docker Desktop from https://docs.docker.com/get-docker/ and start it from Applications.";

#[cfg(target_os = "linux")]
pub const ENGINE_INSTALL_HELP: &str = "Install docker.io (Ubuntu/Debian) or docker-ce (others), \
     then start the daemon: sudo systemctl start docker";

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub const ENGINE_INSTALL_HELP: &str =
    "Install Docker Desktop from https://docs.docker.com/get-docker/";

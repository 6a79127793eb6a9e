/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Directory artifacts are written to and uploaded from.
pub const DEFAULT_OUTPUT_DIR: &str = "./artifacts";

/// File extension of generated artifacts (without the dot).
pub const ARTIFACT_EXTENSION: &str = "mender";

/// Mount point of the host working directory inside the build container.
pub const CONTAINER_WORKDIR: &str = "/workdir";

/// Suffix appended to the project name to form the build image tag.
pub const BUILD_IMAGE_SUFFIX: &str = "-build";

/// Dockerfile used to build the build image, relative to the working directory.
pub const DOCKERFILE: &str = "Dockerfile";

/// Flag passed to `app-gen` to use images from the local Docker daemon.
pub const DEFAULT_LOCAL_IMAGES_FLAG: &str = "--use-local-images";

/// Orchestrator `app-gen` generates artifacts for.
pub const ORCHESTRATOR: &str = "docker-compose";

/// Docker volume holding the `mender-cli` login token between container runs.
pub const MENDER_CACHE_VOLUME: &str = "cache:/home/user/.cache/mender/";

/// Environment variables holding the upload credentials.
pub const ENV_SERVER_URL: &str = "MENDER_SERVER_URL";
pub const ENV_USERNAME: &str = "MENDER_USERNAME";
pub const ENV_PASSWORD: &str = "MENDER_PASSWORD";
pub const ENV_TENANT_TOKEN: &str = "MENDER_TENANT_TOKEN";

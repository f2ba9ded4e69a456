pub const APP_NAME: &str = "toolstage";

/// Environment variable holding the default build output root.
pub const BUILD_ROOT_ENV: &str = "TOOLSTAGE_BUILD_ROOT";

/// Environment variable overriding the number of components climbed above the build root.
pub const ASCEND_ENV: &str = "TOOLSTAGE_ASCEND";

/// Components removed from the build root before appending `bin`.
pub const DEFAULT_ASCEND: usize = 5;

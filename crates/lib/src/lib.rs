//! toolstage-lib: staging of build-tool binaries out of resolved dependencies
//!
//! This crate provides the pieces the `toolstage` binary drives:
//! - `Recipe`: settings, host requirements and tool requirements of the build
//! - `DependencySet`: the resolved dependencies handed over by the package manager
//! - `Layout`: where the build root lives and where staged tools land
//! - `stage`: the copy pass that places tool binaries into the staging directories

pub mod consts;
pub mod deps;
pub mod layout;
pub mod platform;
pub mod recipe;
pub mod stage;
pub mod util;

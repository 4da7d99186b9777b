//! GN build configuration.

use super::env::EnvOverlay;
use super::platform::Platform;
use super::runner::Shell;
use anyhow::Result;
use std::path::Path;

/// GN output directory, relative to the source checkout.
pub const OUT_DIR: &str = "out/Release";

/// GN arguments for one platform.
///
/// Backend toggles that are `None` are left to GN's defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GnArgs {
    pub is_debug: bool,
    pub is_component_build: bool,
    pub enable_metal: Option<bool>,
    pub enable_d3d11: Option<bool>,
    pub enable_vulkan: bool,
    pub enable_gl: bool,
    pub enable_null: bool,
}

impl GnArgs {
    /// Release, static, with the platform's native backend.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Macos => Self {
                is_debug: false,
                is_component_build: false,
                enable_metal: Some(true),
                enable_d3d11: None,
                enable_vulkan: false,
                enable_gl: false,
                enable_null: false,
            },
            Platform::Windows => Self {
                is_debug: false,
                is_component_build: false,
                enable_metal: None,
                enable_d3d11: Some(true),
                enable_vulkan: true,
                enable_gl: false,
                enable_null: false,
            },
            Platform::Linux => Self {
                is_debug: false,
                is_component_build: false,
                enable_metal: None,
                enable_d3d11: None,
                enable_vulkan: true,
                enable_gl: true,
                enable_null: false,
            },
        }
    }

    fn pairs(&self) -> Vec<(&'static str, bool)> {
        let mut pairs = vec![
            ("is_debug", self.is_debug),
            ("is_component_build", self.is_component_build),
        ];
        if let Some(v) = self.enable_metal {
            pairs.push(("angle_enable_metal", v));
        }
        if let Some(v) = self.enable_d3d11 {
            pairs.push(("angle_enable_d3d11", v));
        }
        pairs.push(("angle_enable_vulkan", self.enable_vulkan));
        pairs.push(("angle_enable_gl", self.enable_gl));
        pairs.push(("angle_enable_null", self.enable_null));
        pairs
    }

    /// Space separated `key=value` list as GN expects in `--args`.
    pub fn render(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `gn gen` command line, quoted for the platform's shell.
pub fn gn_command(platform: Platform, args: &GnArgs) -> String {
    let rendered = args.render();
    match platform {
        Platform::Windows => format!("gn gen {OUT_DIR} --args=\"{rendered}\""),
        Platform::Macos | Platform::Linux => format!("gn gen {OUT_DIR} --args='{rendered}'"),
    }
}

pub fn configure(
    source_dir: &Path,
    platform: Platform,
    shell: &dyn Shell,
    overlay: &EnvOverlay,
) -> Result<()> {
    println!("=== Configuring build ===");
    let args = GnArgs::for_platform(platform);
    shell.run(&gn_command(platform, &args), Some(source_dir), overlay)
}

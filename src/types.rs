use std::fmt;
use std::str::FromStr;
use serde::Deserialize;

/// Where the first stage of a pipeline reads its standard input from.
///
/// - `Inherit`: the caller's own stdin (default, matches running a command
///   from a terminal).
/// - `Null`: an empty stream; useful for tests and unattended runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdinMode {
    Inherit,
    Null,
}

impl Default for StdinMode {
    fn default() -> Self {
        StdinMode::Inherit
    }
}

impl FromStr for StdinMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inherit" => Ok(StdinMode::Inherit),
            "null" => Ok(StdinMode::Null),
            other => Err(format!(
                "invalid stdin mode: {other} (expected \"inherit\" or \"null\")"
            )),
        }
    }
}

/// Package management system of a Linux distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageSystem {
    /// Debian and derivatives (`apt-get`).
    Deb,
    /// Fedora / RHEL (`yum`).
    Rpm,
    /// Arch (`pacman`).
    Pacman,
    /// Gentoo (`emerge`).
    Ebuild,
    /// openSUSE (`zypper`).
    Zypp,
}

impl PackageSystem {
    /// Detection order used when probing `/usr/bin`.
    pub const ALL: [PackageSystem; 5] = [
        PackageSystem::Deb,
        PackageSystem::Rpm,
        PackageSystem::Pacman,
        PackageSystem::Ebuild,
        PackageSystem::Zypp,
    ];

    /// Name of the tool binary driving this system.
    pub fn tool(self) -> &'static str {
        match self {
            PackageSystem::Deb => "apt-get",
            PackageSystem::Rpm => "yum",
            PackageSystem::Pacman => "pacman",
            PackageSystem::Ebuild => "emerge",
            PackageSystem::Zypp => "zypper",
        }
    }
}

impl fmt::Display for PackageSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageSystem::Deb => "deb",
            PackageSystem::Rpm => "rpm",
            PackageSystem::Pacman => "pacman",
            PackageSystem::Ebuild => "ebuild",
            PackageSystem::Zypp => "zypp",
        };
        f.write_str(name)
    }
}

impl FromStr for PackageSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deb" | "apt" | "apt-get" => Ok(PackageSystem::Deb),
            "rpm" | "yum" => Ok(PackageSystem::Rpm),
            "pacman" => Ok(PackageSystem::Pacman),
            "ebuild" | "emerge" => Ok(PackageSystem::Ebuild),
            "zypp" | "zypper" => Ok(PackageSystem::Zypp),
            other => Err(format!(
                "invalid package system: {other} (expected deb, rpm, pacman, ebuild or zypp)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_system_accepts_tool_names() {
        assert_eq!("apt-get".parse::<PackageSystem>(), Ok(PackageSystem::Deb));
        assert_eq!(" Zypper ".parse::<PackageSystem>(), Ok(PackageSystem::Zypp));
        assert!("brew".parse::<PackageSystem>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for system in PackageSystem::ALL {
            assert_eq!(system.to_string().parse::<PackageSystem>(), Ok(system));
        }
    }
}

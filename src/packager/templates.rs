// src/packager/templates.rs

//! Command lines for each package system.
//!
//! Every function returns the full list of command lines an operation runs,
//! in order. An empty list means the operation has no equivalent on that
//! system.

use std::path::PathBuf;

use crate::types::PackageSystem;

impl PackageSystem {
    /// Absolute path of the tool, as probed by [`detect`](super::detect).
    pub fn binary_path(self) -> PathBuf {
        PathBuf::from(self.bin())
    }

    fn bin(self) -> String {
        format!("/usr/bin/{}", self.tool())
    }

    /// Refresh the lists of available packages.
    pub fn update_commands(self) -> Vec<String> {
        let bin = self.bin();
        let cmd = match self {
            PackageSystem::Deb => format!("{bin} update"),
            PackageSystem::Rpm => format!("{bin} makecache"),
            PackageSystem::Pacman => format!("{bin} -Sy"),
            PackageSystem::Ebuild => format!("{bin} --sync"),
            PackageSystem::Zypp => format!("{bin} refresh"),
        };
        vec![cmd]
    }

    /// Install `name`, refreshing package lists first when `refresh` is set.
    /// `simulate` only has an effect on Debian (`apt-get -s`).
    pub fn install_commands(self, name: &str, refresh: bool, simulate: bool) -> Vec<String> {
        let bin = self.bin();
        // pacman folds the refresh into the install itself.
        let mut cmds = if refresh && self != PackageSystem::Pacman {
            self.update_commands()
        } else {
            Vec::new()
        };

        cmds.push(match self {
            PackageSystem::Deb => format!("{bin} install -y{} {name}", sim(simulate)),
            PackageSystem::Rpm => format!("{bin} install -y {name}"),
            PackageSystem::Pacman => {
                let flags = if refresh { "-Syu" } else { "-S" };
                format!("{bin} {flags} --needed --noprogressbar {name}")
            }
            PackageSystem::Ebuild => format!("{bin} {name}"),
            PackageSystem::Zypp => format!("{bin} install --auto-agree-with-licenses {name}"),
        });
        cmds
    }

    /// Remove `name`; for a metapackage, also remove dependencies that are
    /// no longer needed where the system supports it.
    pub fn remove_commands(self, name: &str, metapackage: bool, simulate: bool) -> Vec<String> {
        let bin = self.bin();
        match self {
            PackageSystem::Deb => {
                let mut cmds = vec![format!("{bin} remove -y{} {name}", sim(simulate))];
                if metapackage {
                    cmds.push(format!("{bin} autoremove -y{}", sim(simulate)));
                }
                cmds
            }
            PackageSystem::Rpm => vec![format!("{bin} remove -y {name}")],
            PackageSystem::Pacman => {
                let flags = if metapackage { "-Rs" } else { "-R" };
                vec![format!("{bin} {flags} {name}")]
            }
            PackageSystem::Ebuild => {
                let mut cmds = vec![format!("{bin} --unmerge {name}")];
                if metapackage {
                    cmds.push(format!("{bin} --depclean"));
                }
                cmds
            }
            PackageSystem::Zypp => vec![format!("{bin} remove {name}")],
        }
    }

    /// Remove `name` together with its configuration files.
    pub fn purge_commands(self, name: &str, metapackage: bool, simulate: bool) -> Vec<String> {
        let bin = self.bin();
        match self {
            PackageSystem::Deb => {
                let mut cmds = vec![format!("{bin} purge -y{} {name}", sim(simulate))];
                if metapackage {
                    cmds.push(format!("{bin} autoremove --purge -y{}", sim(simulate)));
                }
                cmds
            }
            PackageSystem::Pacman => {
                let flags = if metapackage { "-Rsn" } else { "-Rn" };
                vec![format!("{bin} {flags} {name}")]
            }
            PackageSystem::Rpm | PackageSystem::Ebuild | PackageSystem::Zypp => Vec::new(),
        }
    }

    /// Erase downloaded archive files.
    pub fn clean_commands(self) -> Vec<String> {
        let bin = self.bin();
        match self {
            PackageSystem::Deb => vec![format!("{bin} clean")],
            PackageSystem::Rpm => vec![format!("{bin} clean packages")],
            PackageSystem::Zypp => vec![format!("{bin} clean")],
            PackageSystem::Pacman | PackageSystem::Ebuild => Vec::new(),
        }
    }

    /// Upgrade every installed package.
    pub fn upgrade_commands(self) -> Vec<String> {
        let bin = self.bin();
        match self {
            PackageSystem::Deb => {
                let mut cmds = self.update_commands();
                cmds.push(format!("{bin} upgrade -y"));
                cmds
            }
            PackageSystem::Rpm => vec![format!("{bin} update -y")],
            PackageSystem::Pacman => vec![format!("{bin} -Syu")],
            PackageSystem::Ebuild => {
                let mut cmds = self.update_commands();
                cmds.push(format!("{bin} --update --deep --with-bdeps=y --newuse world"));
                cmds
            }
            PackageSystem::Zypp => {
                let mut cmds = self.update_commands();
                cmds.push(format!("{bin} up --auto-agree-with-licenses"));
                cmds
            }
        }
    }
}

fn sim(simulate: bool) -> &'static str {
    if simulate { " -s" } else { "" }
}

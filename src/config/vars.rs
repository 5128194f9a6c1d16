//! `${name}` variable expansion for path-valued configuration fields.

use std::collections::HashMap;
use std::path::Path;

use crate::xdg::BaseDirs;

/// Variables available for `${name}` expansion in the link file.
///
/// Built once per invocation from the environment and the config file
/// location, then applied to every path-valued field. Expansion is a
/// single pass: expanded values are never rescanned, and the `%{item}`
/// template token is a separate mechanism handled at link time.
#[derive(Debug, Clone, Default)]
pub struct VarMap {
    vars: HashMap<String, String>,
}

impl VarMap {
    /// The standard variable set: `home`, `user`, `email`, `repo`, and the
    /// XDG base directories, each also registered in upper case.
    ///
    /// `repo` is the directory containing the link file. `user` comes from
    /// `USER` (or `USERNAME`), `email` from `EMAIL`; both are empty when
    /// unset. `xdg_runtime_dir` is only registered when `XDG_RUNTIME_DIR`
    /// is set, so an unset variable leaves `${xdg_runtime_dir}` literal.
    #[must_use]
    pub fn standard(home: &Path, repo: &Path, dirs: &BaseDirs) -> Self {
        Self::standard_with(home, repo, dirs, |name| std::env::var(name).ok())
    }

    fn standard_with(
        home: &Path,
        repo: &Path,
        dirs: &BaseDirs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let user = env("USER").or_else(|| env("USERNAME")).unwrap_or_default();
        let email = env("EMAIL").unwrap_or_default();

        let mut map = Self::default();
        map.insert("home", &home.display().to_string());
        map.insert("user", &user);
        map.insert("email", &email);
        map.insert("repo", &repo.display().to_string());
        map.insert("xdg_config_home", &dirs.config_home.display().to_string());
        map.insert("xdg_cache_home", &dirs.cache_home.display().to_string());
        map.insert("xdg_data_home", &dirs.data_home.display().to_string());
        map.insert("xdg_state_home", &dirs.state_home.display().to_string());
        if let Some(runtime_dir) = &dirs.runtime_dir {
            map.insert("xdg_runtime_dir", &runtime_dir.display().to_string());
        }
        map
    }

    /// Register a variable under `name` and its ASCII upper-case form.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
        self.vars
            .insert(name.to_ascii_uppercase(), value.to_string());
    }

    /// Look up a variable by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Expand every known `${name}` reference in `input`.
    ///
    /// Unknown and unterminated references are left literal; expanded
    /// values are not rescanned.
    #[must_use]
    pub fn expand(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find("${") {
            let (before, reference_on) = rest.split_at(start);
            out.push_str(before);
            let Some(end) = reference_on.find('}') else {
                // Unterminated reference; keep the remainder as-is.
                out.push_str(reference_on);
                return out;
            };
            let (reference, tail) = reference_on.split_at(end + 1);
            let name = reference
                .strip_prefix("${")
                .and_then(|inner| inner.strip_suffix('}'))
                .unwrap_or_default();
            match self.vars.get(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(reference),
            }
            rest = tail;
        }
        out.push_str(rest);
        out
    }
}

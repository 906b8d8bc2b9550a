//! Workspace-relative to project-relative path conversion
//!
//! Resolution is purely lexical against a virtual workspace root; the
//! process working directory never takes part.

use std::path::{Component, Path, PathBuf};

const WORKSPACE_ROOT_TOKEN: &str = "{workspaceRoot}";
const PROJECT_ROOT_TOKEN: &str = "{projectRoot}";

/// Express a workspace-relative `path` relative to `project_root`
///
/// - `{projectRoot}` is substituted and a leading `{workspaceRoot}` dropped
/// - absolute paths under `workspace_root` are made workspace-relative first
/// - a project rooted at the workspace root gets a `./` prefix
/// - results always use `/` and start with `.` unless absolute
///
/// ```rust
/// use inferred_target::to_project_relative_path;
///
/// assert_eq!(to_project_relative_path("dist/apps/myapp", "apps/myapp", None), "../../dist/apps/myapp");
/// assert_eq!(to_project_relative_path("apps/myapp/build", "apps/myapp", None), "./build");
/// assert_eq!(to_project_relative_path("dist/myapp", ".", None), "./dist/myapp");
/// ```
#[must_use]
pub fn to_project_relative_path(
    path: &str,
    project_root: &str,
    workspace_root: Option<&Path>,
) -> String {
    let interpolated = path.replace(PROJECT_ROOT_TOKEN, project_root);
    let mut path = interpolated
        .strip_prefix(WORKSPACE_ROOT_TOKEN)
        .map(|rest| rest.trim_start_matches(['/', '\\']).to_string())
        .unwrap_or(interpolated);

    if let Some(root) = workspace_root {
        if let Ok(rest) = Path::new(&path).strip_prefix(root) {
            path = to_slash(rest);
        }
    }

    let base = normalize(Path::new(project_root));
    if base.as_os_str().is_empty() {
        let path = to_slash(Path::new(&path));
        return if path.starts_with('.') {
            path
        } else {
            format!("./{path}")
        };
    }

    let target = normalize(Path::new(&path));
    if target.is_absolute() {
        return to_slash(&target);
    }

    let relative = pathdiff::diff_paths(&target, &base).unwrap_or(target);
    let relative = to_slash(&relative);
    if relative.is_empty() {
        ".".to_string()
    } else if relative.starts_with('.') {
        relative
    } else {
        format!("./{relative}")
    }
}

/// Lexically fold `.` and `..` components
///
/// A `..` that would climb above a relative path's start is kept.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

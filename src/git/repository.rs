use crate::domain::changelog::short_hash;
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Identity, VersionControl};
use git2::{IndexAddOption, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            ReleaseError::external(format!(
                "Not in a git repository ({}): {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self
            .repo
            .head()
            .map_err(|e| ReleaseError::external(format!("Cannot resolve HEAD: {}", e)))?;
        Ok(head.peel_to_commit()?)
    }

    /// Credentials for pushing: SSH keys from ~/.ssh, then the agent, then
    /// the default credential helper.
    fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, allowed_types| {
            let user = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(user, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(user) {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(config) = git2::Config::open_default() {
                    if let Ok(cred) = git2::Cred::credential_helper(&config, url, username_from_url)
                    {
                        return Ok(cred);
                    }
                }
            }

            git2::Cred::default()
        });
        callbacks
    }
}

/// Turns a ref the remote refused into an error.
///
/// libgit2 only reports per-ref rejections through this callback; the push
/// call itself still succeeds.
fn check_push_status(refname: &str, status: Option<&str>) -> std::result::Result<(), git2::Error> {
    match status {
        Some(reason) => {
            tracing::warn!(refname, reason, "remote rejected push");
            Err(git2::Error::from_str(&format!(
                "Push failed for {}: {}",
                refname, reason
            )))
        }
        None => Ok(()),
    }
}

impl VersionControl for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| ReleaseError::external(format!("Cannot resolve HEAD: {}", e)))?;

        if !head.is_branch() {
            return Ok("HEAD".to_string());
        }

        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| ReleaseError::external("Branch name is not valid UTF-8"))
    }

    fn head_short_hash(&self) -> Result<String> {
        let id = self.head_commit()?.id().to_string();
        Ok(short_hash(&id).to_string())
    }

    fn messages_since(&self, since: &str) -> Result<Vec<CommitInfo>> {
        let base = self
            .repo
            .revparse_single(since)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| ReleaseError::external(format!("Cannot find commit '{}': {}", since, e)))?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.hide(base.id())?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message,
            });
        }

        Ok(commits)
    }

    fn set_identity(&self, identity: &Identity) -> Result<()> {
        let mut config = self.repo.config()?.open_level(git2::ConfigLevel::Local)?;
        config.set_str("user.name", &identity.name)?;
        config.set_str("user.email", &identity.email)?;
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.head_commit()?;
        let signature = self.repo.signature()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        tracing::debug!(%oid, "created commit");
        Ok(())
    }

    fn push_force(&self, remote: &str) -> Result<()> {
        let branch = self.current_branch()?;
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::external(format!("Cannot find remote: {}", e)))?;

        let mut callbacks = Self::remote_callbacks();
        callbacks.push_update_reference(check_push_status);
        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("+refs/heads/{}:refs/heads/{}", branch, branch);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| ReleaseError::external(format!("Push failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_ref_is_ok() {
        assert!(check_push_status("refs/heads/development", None).is_ok());
    }

    #[test]
    fn test_rejected_ref_is_an_error() {
        let err = check_push_status("refs/heads/development", Some("pre-receive hook declined"))
            .unwrap_err();
        assert!(err.message().contains("refs/heads/development"));
        assert!(err.message().contains("pre-receive hook declined"));
    }
}

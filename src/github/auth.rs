use anyhow::Context;

const GITHUB_COM_TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];
const ENTERPRISE_TOKEN_VARS: [&str; 2] = ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"];

/// Looks up a token for `host`. Missing credentials are not an error: public
/// repositories can be read anonymously.
pub fn fetch_token(host: &str) -> anyhow::Result<Option<String>> {
    if let Some(token) = token_from_env(host) {
        return Ok(Some(token));
    }
    if let Some(token) = token_from_gh_cli(host)? {
        return Ok(Some(token));
    }

    tracing::info!(host, "no GitHub token found, continuing anonymously");
    Ok(None)
}

fn token_vars(host: &str) -> &'static [&'static str] {
    if host.eq_ignore_ascii_case("github.com") {
        &GITHUB_COM_TOKEN_VARS
    } else {
        &ENTERPRISE_TOKEN_VARS
    }
}

fn token_from_env(host: &str) -> Option<String> {
    token_vars(host)
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|value| non_empty(&value))
}

fn token_from_gh_cli(host: &str) -> anyhow::Result<Option<String>> {
    let output = match std::process::Command::new("gh")
        .args(["auth", "token", "--secure-storage", "--hostname", host])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("failed to execute `gh auth token`"),
    };

    if !output.status.success() {
        tracing::debug!(host, status = %output.status, "`gh auth token` returned no token");
        return Ok(None);
    }
    Ok(non_empty(&String::from_utf8_lossy(&output.stdout)))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Expand an `owner/repo` shorthand into a canonical https URL.
///
/// Anything already carrying a scheme or a `git@` prefix is stored
/// verbatim, as is any schemeless string that is not exactly two
/// slash-separated segments.
pub fn expand_remote_url(input: &str, host: &str) -> String {
    let input = input.trim();
    if input.contains("://") || input.starts_with("git@") {
        return input.to_string();
    }
    let segments: Vec<&str> = input.split('/').collect();
    if segments.len() == 2 && segments.iter().all(|s| !s.is_empty()) {
        return format!("https://{}/{}/{}.git", host, segments[0], segments[1]);
    }
    input.to_string()
}

use tracing::debug;

/// Get the hostname configured on the local machine
///
/// Failures are not surfaced; an empty hostname is reported instead
pub fn get_hostname() -> String {
  match dns_lookup::get_hostname() {
    Ok(hostname) => hostname,
    Err(err) => {
      debug!("Failed to get hostname: {err}");
      String::new()
    }
  }
}

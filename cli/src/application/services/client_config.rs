//! Client configuration use-cases: transformation, certificate resolution,
//! and merging into the on-disk client configuration file.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::certificate::decode_certificate;
use crate::domain::config::{CLIENT_SECTION, SSL_PUBLIC_KEY, build_client_config, certificate_option};
use crate::domain::{CharmPaths, ClientCharmError, ClientConfig, IniDocument, RawConfig};

/// Resolve certificate material to a path.
///
/// An existing file path is returned unchanged. Anything else is decoded as
/// base64 and written to `cert_path`, which is returned.
///
/// # Errors
///
/// Returns [`ClientCharmError::CertificateUnavailable`] if the value can be
/// neither decoded nor written.
pub fn resolve_certificate(
    fs: &impl LocalFs,
    value: &str,
    cert_path: &Path,
) -> Result<String, ClientCharmError> {
    if fs.is_file(Path::new(value)) {
        return Ok(value.to_string());
    }

    let bytes = decode_certificate(value).map_err(|e| {
        tracing::error!(error = %e, length = value.len(), "certificate is neither a file nor base64");
        ClientCharmError::CertificateUnavailable
    })?;
    fs.write(cert_path, &bytes).map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), path = %cert_path.display(), "cannot write certificate");
        ClientCharmError::CertificateUnavailable
    })?;

    Ok(cert_path.to_string_lossy().into_owned())
}

/// Create the client configuration from the orchestrator configuration.
///
/// On top of [`build_client_config`], resolves `ssl_ca` (or, failing that,
/// the deprecated `ssl_public_key`) to a certificate path.
///
/// # Errors
///
/// Returns an error if the additional configuration is malformed or the
/// certificate cannot be resolved.
pub fn create_client_config(
    raw_config: &RawConfig,
    default_computer_title: &str,
    fs: &impl LocalFs,
    cert_path: &Path,
) -> Result<ClientConfig, ClientCharmError> {
    let mut config = build_client_config(raw_config, default_computer_title)?;

    if let Some((key, value)) = certificate_option(&config) {
        let path = resolve_certificate(fs, &value, cert_path)?;
        if key == SSL_PUBLIC_KEY {
            tracing::warn!("`ssl_public_key` is deprecated; use `ssl_ca` instead.");
        }
        config.insert(key, path);
    }
    Ok(config)
}

/// Overlay `values` onto the `[client]` section of the file at `path`.
///
/// A missing file starts from an empty document. Falsy values
/// are skipped so they never erase configured ones. Other sections and keys
/// are kept as they are.
///
/// # Errors
///
/// Returns [`ClientCharmError::ConfigWrite`] if an existing file cannot be
/// read or parsed, leaving it untouched, or if the result cannot be written.
pub fn merge_client_config(
    fs: &impl LocalFs,
    path: &Path,
    values: &ClientConfig,
) -> Result<(), ClientCharmError> {
    let mut doc = if fs.exists(path) {
        let text = fs.read_to_string(path).map_err(|e| {
            ClientCharmError::ConfigWrite(format!("cannot read {}: {e:#}", path.display()))
        })?;
        IniDocument::parse(&text).map_err(|e| {
            ClientCharmError::ConfigWrite(format!("cannot parse {}: {e}", path.display()))
        })?
    } else {
        IniDocument::default()
    };

    doc.ensure_section(CLIENT_SECTION);
    for (key, value) in values.iter().filter(|(_, v)| v.is_truthy()) {
        doc.set(CLIENT_SECTION, key, value.to_config_string());
    }

    fs.write(path, doc.render().as_bytes())
        .map_err(|e| ClientCharmError::ConfigWrite(format!("{e:#}")))?;

    let keys: Vec<&String> = doc
        .section(CLIENT_SECTION)
        .map(|client| client.keys().collect())
        .unwrap_or_default();
    tracing::info!(path = %path.display(), ?keys, "client configuration merged");
    Ok(())
}

/// Translate the orchestrator configuration and persist it.
///
/// # Errors
///
/// Returns an error if translation or merging fails; nothing is written when
/// translation fails.
pub fn set_client_config(
    fs: &impl LocalFs,
    raw_config: &RawConfig,
    hostname: &str,
    paths: &CharmPaths,
) -> Result<ClientConfig, ClientCharmError> {
    let config = create_client_config(raw_config, hostname, fs, &paths.cert_file)?;
    merge_client_config(fs, &paths.client_conf, &config)?;
    Ok(config)
}

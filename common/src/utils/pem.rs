use reqwest::Certificate;
use std::path::Path;

/// Add all certificates of a PEM bundle as trust anchors to the client.
pub fn add_cert<P: AsRef<Path>>(
    mut client: reqwest::ClientBuilder,
    cert: P,
) -> anyhow::Result<reqwest::ClientBuilder> {
    let cert = cert.as_ref();
    log::debug!("Adding root certificates from: {}", cert.display());

    let pems = pem::parse_many(std::fs::read(cert)?)?;
    let certs = pems
        .into_iter()
        .map(|pem| Certificate::from_pem(pem::encode(&pem).as_bytes()).map_err(|err| err.into()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if certs.is_empty() {
        anyhow::bail!("No certificates found in {}", cert.display());
    }

    log::debug!("Found {} certificates", certs.len());

    for cert in certs {
        client = client.add_root_certificate(cert);
    }

    Ok(client)
}

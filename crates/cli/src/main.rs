//! CLI tool for Aadhar QR payloads
//!
//! Decodes the byte payload of a scanned Aadhar QR code (secure container,
//! compressed text, or legacy text) and verifies UIDAI signatures.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rsa::traits::PublicKeyParts;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use aadhar_qr_core::{
    classify, decode_with_config, load_public_key, DecodeConfig, DecodedQr, IdentityRecord,
    SecureContainer,
};

#[derive(Parser)]
#[command(name = "aadhar-qr")]
#[command(about = "Decoder for Aadhar offline KYC QR payloads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a QR payload and display its identity data
    Decode {
        /// Path to the raw payload bytes, or '-' for stdin
        #[arg(short, long)]
        payload: PathBuf,

        /// UIDAI signing certificate or public key (PEM or DER)
        #[arg(short, long, env = "AADHAR_QR_PUBLIC_KEY")]
        key: PathBuf,

        /// Decoder configuration file (JSON format)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the secure text length threshold
        #[arg(short, long)]
        threshold: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Keep trailing line endings on the payload
        #[arg(long)]
        raw: bool,
    },

    /// Report whether a payload is all digits, and its length
    Classify {
        /// Path to the raw payload bytes, or '-' for stdin
        #[arg(short, long)]
        payload: PathBuf,

        /// Keep trailing line endings on the payload
        #[arg(long)]
        raw: bool,
    },

    /// Dump the header of a secure container without verifying it
    Inspect {
        /// Path to the raw payload bytes, or '-' for stdin
        #[arg(short, long)]
        payload: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show example usage
    Examples,
}

/// Container layout summary printed by `inspect`
#[derive(Serialize)]
struct InspectReport {
    version: u16,
    format: u16,
    xml_len: usize,
    photo_len: usize,
    body_len: usize,
    signature_offset: usize,
    gap: isize,
    payload_len: usize,
}

impl From<&SecureContainer<'_>> for InspectReport {
    fn from(container: &SecureContainer<'_>) -> Self {
        Self {
            version: container.version,
            format: container.format,
            xml_len: container.xml.len(),
            photo_len: container.photo.len(),
            body_len: container.body_len,
            signature_offset: container.signature_offset(),
            gap: container.gap(),
            payload_len: container.payload_len,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Decode { payload, key, config, threshold, json, raw } => {
            cmd_decode(payload, key, config, threshold, json, raw)
        }
        Commands::Classify { payload, raw } => cmd_classify(payload, raw),
        Commands::Inspect { payload, json } => cmd_inspect(payload, json),
        Commands::Examples => cmd_examples(),
    }
}

/// Read payload bytes from a file, or stdin when the path is `-`
fn read_payload(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read payload from stdin")?;
        log::debug!("Read {} payload bytes from stdin", buf.len());
        return Ok(buf);
    }

    let payload = std::fs::read(path)
        .with_context(|| format!("Failed to read payload: {}", path.display()))?;
    log::debug!("Read {} payload bytes from {}", payload.len(), path.display());
    Ok(payload)
}

/// Drop the line ending a scanner tool leaves after a digit string.
///
/// Binary payloads are returned untouched; a container may end in 0x0A.
fn trim_line_ending(payload: Vec<u8>) -> Vec<u8> {
    let end = payload
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |pos| pos + 1);

    let trimmed = &payload[..end];
    if end < payload.len() && !trimmed.is_empty() && classify(trimmed).all_decimal {
        log::debug!("Stripped {} trailing line-ending bytes", payload.len() - end);
        trimmed.to_vec()
    } else {
        payload
    }
}

fn load_config(path: Option<&Path>, threshold: Option<usize>) -> Result<DecodeConfig> {
    let mut config: DecodeConfig = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => DecodeConfig::default(),
    };

    if let Some(threshold) = threshold {
        config.secure_text_threshold = threshold;
    }
    log::debug!("Decode config: {:?}", config);
    Ok(config)
}

fn cmd_decode(
    payload_path: PathBuf,
    key_path: PathBuf,
    config_path: Option<PathBuf>,
    threshold: Option<usize>,
    json: bool,
    raw: bool,
) -> Result<()> {
    let config = load_config(config_path.as_deref(), threshold)?;
    let public_key = load_public_key(&key_path)
        .with_context(|| format!("Failed to load public key: {}", key_path.display()))?;
    log::info!("Using public key from {}", key_path.display());

    let mut payload = read_payload(&payload_path)?;
    if !raw {
        payload = trim_line_ending(payload);
    }

    let decoded = decode_with_config(&payload, &public_key, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    println!("📄 Decoding QR payload: {}", payload_path.display());
    println!("   Size: {} bytes", payload.len());
    println!("   Key:  {} bits", public_key.size() * 8);
    println!();
    println!("✅ Recognized format: {}", decoded.format());
    println!();

    match &decoded {
        DecodedQr::Legacy { raw_text } => {
            println!("Legacy QR text (not interpreted):");
            println!("  {}", raw_text);
        }
        DecodedQr::SecureContainer(record)
        | DecodedQr::FormatA(record)
        | DecodedQr::FormatB(record) => print_record(record),
    }

    Ok(())
}

fn print_record(record: &IdentityRecord) {
    println!("Personal Information:");
    println!("  Reference: {}", record.reference_id);
    println!("  Name:      {}", record.name);
    println!("  DOB:       {}", record.dob);
    if let Some(age) = record.age() {
        println!("  Age:       {} years", age);
    }
    println!("  Gender:    {}", record.gender);
    if let Some(mobile) = &record.mobile {
        println!("  Mobile:    {}", mobile);
    }
    if let Some(email) = &record.email {
        println!("  Email:     {}", email);
    }
    println!();

    println!("Address:");
    match &record.full_address {
        Some(line) => println!("  {}", line),
        None => println!("  {}", record.address.full_address()),
    }
    println!();

    if let Some(photo) = &record.photo {
        println!("Photo: {} base64 chars", photo.len());
        println!();
    }

    println!("Signature:");
    if record.signature_verified {
        println!("  Verified: true");
    } else {
        println!("  Verified: false (format carries no signature)");
    }
}

fn cmd_classify(payload_path: PathBuf, raw: bool) -> Result<()> {
    let mut payload = read_payload(&payload_path)?;
    if !raw {
        payload = trim_line_ending(payload);
    }

    let class = classify(&payload);
    println!("{}", serde_json::to_string_pretty(&class)?);

    Ok(())
}

fn cmd_inspect(payload_path: PathBuf, json: bool) -> Result<()> {
    let payload = read_payload(&payload_path)?;
    let container = SecureContainer::parse(&payload)?;
    log::warn!("Inspecting container layout only; the signature is not checked");
    let report = InspectReport::from(&container);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("🔍 Secure container layout (signature NOT verified)");
    println!();
    println!("  Version:          {}", report.version);
    println!("  Format:           {}", report.format);
    println!("  XML block:        {} bytes", report.xml_len);
    println!("  Photo block:      {} bytes", report.photo_len);
    println!("  Body:             {} bytes", report.body_len);
    println!("  Signature offset: {}", report.signature_offset);
    println!("  Payload:          {} bytes", report.payload_len);
    if report.gap < 0 {
        println!("  Photo overlaps signature by {} bytes", -report.gap);
    } else {
        println!("  Gap before signature: {} bytes", report.gap);
    }

    Ok(())
}

fn cmd_examples() -> Result<()> {
    println!("📚 Example Usage");
    println!();
    println!("1. Decode a scanned QR payload:");
    println!("   aadhar-qr decode -p qr.bin -k uidai_offline_publickey.cer");
    println!();
    println!("2. Decode from stdin and print JSON:");
    println!("   zbarimg --raw -q card.png | aadhar-qr decode -p - -k uidai.cer --json");
    println!();
    println!("3. Use a key from the environment:");
    println!("   export AADHAR_QR_PUBLIC_KEY=uidai_offline_publickey.cer");
    println!("   aadhar-qr decode -p qr.txt");
    println!();
    println!("4. Override the secure text threshold:");
    println!("   aadhar-qr decode -p qr.txt -k uidai.cer -t 400");
    println!();
    println!("5. Check how a payload will be classified:");
    println!("   aadhar-qr classify -p qr.txt");
    println!();
    println!("6. Inspect a secure container header:");
    println!("   aadhar-qr inspect -p qr.bin");
    println!();
    println!("💡 Tips:");
    println!("   - Use --verbose or -v for detailed logging");
    println!("   - Only secure containers carry a signature; text formats are unverified");
    println!("   - Config files are JSON, for example:");
    println!("     {{\"secure_text_threshold\": 500, \"max_decompressed_size\": 1048576}}");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_digit_payload() {
        assert_eq!(trim_line_ending(b"12345\r\n".to_vec()), b"12345");
        assert_eq!(trim_line_ending(b"12345\n".to_vec()), b"12345");
        assert_eq!(trim_line_ending(b"12345".to_vec()), b"12345");
    }

    #[test]
    fn test_binary_payload_untouched() {
        let payload = vec![0x02, 0x00, 0xAB, b'\n'];
        assert_eq!(trim_line_ending(payload.clone()), payload);

        assert_eq!(trim_line_ending(b"\n\n".to_vec()), b"\n\n");
        assert_eq!(trim_line_ending(b"name\n".to_vec()), b"name\n");
    }

    #[test]
    fn test_read_payload_from_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../tests/fixtures/sample_format_b.txt");
        let payload = trim_line_ending(read_payload(&path).unwrap());
        assert!(payload.len() > 500);
        assert!(classify(&payload).all_decimal);
    }

    #[test]
    fn test_read_payload_missing_file() {
        let err = read_payload(Path::new("no/such/payload.bin")).unwrap_err();
        assert!(err.to_string().contains("no/such/payload.bin"));
    }

    #[test]
    fn test_threshold_overrides_config() {
        let config = load_config(None, Some(42)).unwrap();
        assert_eq!(config.secure_text_threshold, 42);
        assert_eq!(config.max_decompressed_size, DecodeConfig::default().max_decompressed_size);
    }

    #[test]
    fn test_cli_parses_decode() {
        let args = ["aadhar-qr", "decode", "-p", "qr.bin", "-k", "key.pem", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Decode { payload, key, json, raw, .. } => {
                assert_eq!(payload, PathBuf::from("qr.bin"));
                assert_eq!(key, PathBuf::from("key.pem"));
                assert!(json);
                assert!(!raw);
            }
            _ => panic!("expected decode"),
        }
    }
}

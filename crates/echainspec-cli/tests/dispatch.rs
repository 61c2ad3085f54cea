//! End-to-end dispatch scenarios through the library API: resolution
//! precedence, conversion, inspection output, and the failure paths the
//! binary maps to exit code 1.

use std::io::Write;
use std::path::Path;

use echainspec_cli::commands::{check_consistency, fork_lines, ips_lines, print_or_convert};
use echainspec_cli::resolve::{resolve_spec, ResolveOptions};
use echainspec_core::{Configurator, SpecError};
use echainspec_formats::{default_registry, format_registry};

const GETH_MAINNET: &str = r#"{
    "config": {
        "chainId": 1,
        "homesteadBlock": 1150000,
        "daoForkBlock": 1920000,
        "daoForkSupport": true,
        "eip150Block": 2463000,
        "eip155Block": 2675000,
        "eip158Block": 2675000,
        "byzantiumBlock": 4370000,
        "constantinopleBlock": 7280000,
        "petersburgBlock": 7280000,
        "istanbulBlock": 9069000,
        "ethash": {}
    },
    "difficulty": "0x400000000",
    "gasLimit": "0x1388"
}"#;

fn resolve_default(name: &str) -> Result<Box<dyn Configurator>, SpecError> {
    let options = ResolveOptions {
        default_chain: Some(name),
        ..ResolveOptions::default()
    };
    resolve_spec(
        &format_registry(),
        &default_registry(),
        &options,
        &mut std::io::empty(),
    )
}

fn resolve_bytes(
    bytes: &str,
    input_format: Option<&str>,
) -> Result<Box<dyn Configurator>, SpecError> {
    let options = ResolveOptions {
        input_format,
        ..ResolveOptions::default()
    };
    resolve_spec(
        &format_registry(),
        &default_registry(),
        &options,
        &mut std::io::Cursor::new(bytes.to_string()),
    )
}

#[test]
fn default_classic_forks_prints_the_known_schedule() {
    let spec = resolve_default("classic").unwrap();
    assert_eq!(
        fork_lines(spec.as_ref()),
        vec![
            "1150000", "1920000", "2500000", "3000000", "5000000", "5900000", "8772000",
            "9573000", "10500839", "13189133", "14525000",
        ]
    );
}

#[test]
fn unknown_default_is_an_error_with_no_output() {
    let err = resolve_default("not-a-chain").err().unwrap();
    assert!(matches!(err, SpecError::UnknownDefault { name } if name == "not-a-chain"));
}

#[test]
fn empty_default_is_missing_chainspec() {
    let err = resolve_default("").err().unwrap();
    assert!(matches!(err, SpecError::MissingChainSpec));
}

#[test]
fn undetectable_piped_bytes_fail_detection() {
    let err = resolve_bytes("ceci n'est pas une chainspec", None).err().unwrap();
    assert!(matches!(err, SpecError::NoFormatDetected));
}

#[test]
fn geth_to_multigeth_conversion_preserves_identity() {
    let formats = format_registry();
    let source = resolve_bytes(GETH_MAINNET, Some("geth")).unwrap();

    let printed = print_or_convert(source.as_ref(), Some("multigeth"), &formats).unwrap();
    let converted = resolve_bytes(&printed, Some("multigeth")).unwrap();

    assert_eq!(converted.chain_id(), source.chain_id());
    assert_eq!(
        fork_lines(converted.as_ref()),
        fork_lines(source.as_ref())
    );
}

#[test]
fn file_input_resolves_like_stdin() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GETH_MAINNET.as_bytes()).unwrap();

    let options = ResolveOptions {
        file: Some(file.path()),
        input_format: Some("geth"),
        ..ResolveOptions::default()
    };
    let spec = resolve_spec(
        &format_registry(),
        &default_registry(),
        &options,
        &mut std::io::empty(),
    )
    .unwrap();
    assert_eq!(spec.chain_id(), Some(1));
}

#[test]
fn missing_file_is_an_io_error() {
    let options = ResolveOptions {
        file: Some(Path::new("/no/such/spec.json")),
        ..ResolveOptions::default()
    };
    let err = resolve_spec(
        &format_registry(),
        &default_registry(),
        &options,
        &mut std::io::empty(),
    )
    .err().unwrap();
    assert!(matches!(err, SpecError::Io(_)));
}

#[test]
fn declared_format_mismatch_names_the_format() {
    let err = resolve_bytes("&&&", Some("parity")).err().unwrap();
    match err {
        SpecError::InvalidInput { format, .. } => assert_eq!(format, "parity"),
        other => panic!("expected InvalidInput, got {other}"),
    }
}

#[test]
fn ips_output_is_deterministic_across_resolutions() {
    let first = ips_lines(resolve_default("mordor").unwrap().as_ref());
    let second = ips_lines(resolve_default("mordor").unwrap().as_ref());
    assert_eq!(first, second);
    assert!(first.contains(&"eip2 0".to_string()));
}

#[test]
fn validate_passes_on_consistent_defaults() {
    let spec = resolve_default("kotti").unwrap();
    assert!(check_consistency(spec.as_ref(), 3_000_000).is_ok());
}

#[test]
fn validate_fails_on_a_broken_schedule() {
    // A fee market scheduled without typed transactions.
    let broken = r#"{
        "config": {
            "chainId": 1337,
            "eip1559FBlock": 100
        }
    }"#;
    let spec = resolve_bytes(broken, Some("multigeth")).unwrap();
    let err = check_consistency(spec.as_ref(), 100).unwrap_err();
    assert!(matches!(err, SpecError::ValidationFailed { height: 100 }));

    // Below the activation height the schedule is still consistent.
    assert!(check_consistency(spec.as_ref(), 99).is_ok());
}

#[test]
fn conversion_failures_produce_no_partial_output() {
    let formats = format_registry();
    let spec = resolve_default("classic").unwrap();
    let result = print_or_convert(spec.as_ref(), Some("geth"), &formats);
    assert!(matches!(
        result,
        Err(SpecError::UnsupportedConversion { format: "geth", .. })
    ));
}

//! Generate a synthetic handshake descriptor with a known passphrase.
//!
//! The output feeds the CLI and experiments without needing a real capture;
//! the derived tag is computed from the given passphrase, so a search
//! configured to cover it can terminate with an exact match.

use std::path::Path;

use evocrack::schema::HandshakeDescriptor;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let passphrase = args.get(1).map(String::as_str).unwrap_or("testpass");
    let ssid = args.get(2).map(String::as_str).unwrap_or("TestNetwork");
    let output = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("test_handshake.json");

    let ap_mac = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
    let client_mac = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
    let anonce = [0x01; 32];
    let snonce = [0x02; 32];
    let eapol_frame = vec![0x02; 121];

    let descriptor = HandshakeDescriptor::synthesize(
        passphrase,
        ssid.as_bytes(),
        ap_mac,
        client_mac,
        anonce,
        snonce,
        eapol_frame,
    )
    .unwrap_or_else(|e| {
        eprintln!("Error synthesizing handshake: {}", e);
        std::process::exit(1);
    });

    descriptor.save_to_file(Path::new(output)).unwrap_or_else(|e| {
        eprintln!("Error writing {}: {}", output, e);
        std::process::exit(1);
    });

    println!("Created test handshake: {}", output);
    println!("  SSID: {}", ssid);
    println!("  Passphrase: {}", passphrase);
    println!();
    println!("Search for it with:");
    println!("  cargo run --release -- {}", output);
}

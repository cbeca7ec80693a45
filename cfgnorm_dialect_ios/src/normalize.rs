//! Dialect-specific canonicalization helpers.
//!
//! Downstream equality checks are literal, so anything the dialect spells
//! in several ways has to collapse to one form here: interface type names
//! abbreviate, IPv4 netmasks become prefix lengths, and bare address-family
//! names gain their implied `unicast` qualifier.

use cfgnorm_ir::Key;

/// Canonical short forms for interface type names, keyed by the full name
/// and the short form itself (configs mix both spellings freely).
const INTERFACE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ethernet", "Eth"),
    ("eth", "Eth"),
    ("fastethernet", "Fa"),
    ("fa", "Fa"),
    ("gigabitethernet", "Gi"),
    ("gi", "Gi"),
    ("tengigabitethernet", "Te"),
    ("te", "Te"),
    ("twentyfivegige", "Twe"),
    ("twe", "Twe"),
    ("fortygigabitethernet", "Fo"),
    ("fo", "Fo"),
    ("hundredgige", "Hu"),
    ("hu", "Hu"),
    ("loopback", "Lo"),
    ("lo", "Lo"),
    ("port-channel", "Po"),
    ("po", "Po"),
    ("tunnel", "Tu"),
    ("tu", "Tu"),
    ("vlan", "Vl"),
    ("vl", "Vl"),
];

/// Abbreviate an interface name (`Vlan100` -> `Vl100`, `Ethernet1/10` ->
/// `Eth1/10`). Unknown type names pass through unchanged.
pub(crate) fn interface_name(name: &str) -> String {
    let split = name
        .find(|ch: char| !ch.is_ascii_alphabetic() && ch != '-')
        .unwrap_or(name.len());
    let (kind, rest) = name.split_at(split);
    let lowered = kind.to_ascii_lowercase();

    for (long, short) in INTERFACE_ABBREVIATIONS {
        if lowered == *long {
            return format!("{short}{rest}");
        }
    }

    name.to_string()
}

/// Convert an IPv4 address + netmask pair to CIDR form
/// (`10.1.0.0 255.255.255.0` -> `10.1.0.0/24`).
///
/// Returns `None` for a non-contiguous or unparseable mask; the caller
/// treats the whole line as unrecognized.
pub(crate) fn v4_cidr(addr: &str, mask: &str) -> Option<String> {
    let mask = parse_quad(mask)?;
    let ones = mask.leading_ones();
    let contiguous = if ones == 0 {
        mask == 0
    } else {
        mask == u32::MAX << (32 - ones)
    };
    if !contiguous {
        return None;
    }

    parse_quad(addr)?;
    Some(format!("{addr}/{ones}"))
}

fn parse_quad(text: &str) -> Option<u32> {
    let mut octets = text.split('.');
    let mut value = 0u32;
    for _ in 0..4 {
        let octet: u8 = octets.next()?.parse().ok()?;
        value = (value << 8) | u32::from(octet);
    }
    if octets.next().is_some() {
        return None;
    }
    Some(value)
}

/// True when a token can only be a next-hop address, never an interface
/// name or metric: IPv6 (contains `:`) or dotted-quad IPv4.
pub(crate) fn looks_like_address(token: &str) -> bool {
    if token.contains(':') {
        return true;
    }

    let mut parts = 0usize;
    for part in token.split('.') {
        if part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()) {
            return false;
        }
        parts += 1;
    }
    parts > 1
}

/// BGP address-family canonicalization: split off a trailing `vrf NAME`
/// clause (VRF-global sentinel when absent) and add the implied `unicast`
/// qualifier to bare family names. Explicit qualifiers pass through.
pub(crate) fn bgp_family(args: &[&str]) -> (String, Key) {
    let mut family = Vec::new();
    let mut vrf = Key::Global;

    let mut iter = args.iter();
    while let Some(token) = iter.next() {
        if *token == "vrf" {
            if let Some(name) = iter.next() {
                vrf = Key::Str((*name).to_string());
            }
        } else {
            family.push(*token);
        }
    }

    let family = match family.as_slice() {
        [bare @ ("ipv4" | "ipv6" | "vpnv4" | "vpnv6")] => format!("{bare} unicast"),
        parts => parts.join(" "),
    };

    (family, vrf)
}

/// OSPFv3 address-family names are bare `ipv4`/`ipv6`; a `unicast`
/// qualifier is accepted and dropped.
pub(crate) fn ospfv3_family(args: &[&str]) -> Option<String> {
    match args.first() {
        Some(family @ &("ipv4" | "ipv6")) => Some((*family).to_string()),
        _ => None,
    }
}

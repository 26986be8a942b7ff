//! Byte size formatting

/// Human-readable size (`512 B`, `1.5 KB`, ...); empty when unknown or zero
pub fn human_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return String::new(),
    };

    let units = ["B", "KB", "MB", "GB"];
    let mut n = bytes as f64;
    let mut i = 0;
    while n >= 1024.0 && i < units.len() - 1 {
        n /= 1024.0;
        i += 1;
    }

    if i == 0 {
        format!("{} {}", bytes, units[0])
    } else {
        format!("{:.1} {}", n, units[i])
    }
}

use blake3::Hasher;

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Used for log fields and short identifiers only. Cache keys use the full
/// 32-byte digest from [`hash_assessment_key`].
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Returns the first `max_chars` characters of `content` (char-boundary safe).
#[inline]
pub fn content_prefix(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Derives the assessment-cache key.
///
/// The key covers the first `prefix_chars` characters of `content`, the sorted
/// domain list (duplicates kept, one per source), and the subject. Each field is length-prefixed so that
/// shifting bytes between fields cannot produce the same key.
///
/// # Collision Policy
///
/// The full 256-bit BLAKE3 output is used as the key, so accidental collisions are
/// computationally infeasible and no full-key comparison is stored alongside entries.
/// Truncation to `prefix_chars` is intentional: inputs sharing a prefix, domains, and
/// subject share one cache entry.
pub fn hash_assessment_key<'a, I>(
    content: &str,
    domains: I,
    subject: &str,
    prefix_chars: usize,
) -> [u8; 32]
where
    I: IntoIterator<Item = &'a str>,
{
    let mut domains: Vec<&str> = domains.into_iter().collect();
    domains.sort_unstable();

    let mut hasher = Hasher::new();
    update_field(&mut hasher, content_prefix(content, prefix_chars).as_bytes());
    hasher.update(&(domains.len() as u64).to_le_bytes());
    for domain in domains {
        update_field(&mut hasher, domain.as_bytes());
    }
    update_field(&mut hasher, subject.as_bytes());
    *hasher.finalize().as_bytes()
}

#[inline]
fn update_field(hasher: &mut Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

//! Relative link computation.

use std::borrow::Cow;

/// Rewrites the absolute path `target` relative to the document at `base`.
///
/// Both paths are compared byte by byte. The result depends on where they
/// first disagree (`mismatch`), the last `/` they share before that point
/// (`base_dir`), and how many `/` of `base` lie past it (`dir_count`):
///
/// | mismatch | dir_count | result |
/// |----------|-----------|--------|
/// | none     | 0         | `target` |
/// | none     | > 0       | `target` past the shared prefix |
/// | first    | 0         | `target` |
/// | first    | > 0       | `../` × `dir_count`, then `target` |
/// | later    | 0         | `target` past the shared prefix |
/// | later    | > 0       | `../` × `dir_count`, then `target` past the shared prefix |
///
/// ```
/// use tapestry::relativize;
///
/// assert_eq!(relativize("/a/b/c", "/a/b/d"), "d");
/// assert_eq!(relativize("/a/b/c", "/a/x/y"), "../x/y");
/// assert_eq!(relativize("/a/b/c", "/a/b/c"), "/a/b/c");
/// ```
pub fn relativize<'t>(base: &str, target: &'t str) -> Cow<'t, str> {
    let base = base.as_bytes();
    let target_bytes = target.as_bytes();

    let mut base_dir: Option<usize> = None;
    let mut dir_count = 0;
    let mut mismatch: Option<usize> = None;

    for (i, &b) in base.iter().enumerate() {
        match target_bytes.get(i) {
            Some(&t) if t == b => {
                if b == b'/' {
                    if mismatch.is_none() {
                        base_dir = Some(i);
                    } else {
                        dir_count += 1;
                    }
                }
            }
            Some(_) => {
                mismatch.get_or_insert(i);
                if b == b'/' {
                    dir_count += 1;
                }
            }
            None => {
                mismatch.get_or_insert(i);
                if b == b'/' {
                    dir_count += 1;
                }
            }
        }
    }

    let shared = |target: &'t str| match base_dir {
        Some(dir) => &target[dir + 1..],
        None => target,
    };

    match (mismatch, dir_count) {
        (None, 0) | (Some(0), 0) => Cow::Borrowed(target),
        (None, _) => Cow::Borrowed(shared(target)),
        (Some(0), n) => Cow::Owned(format!("{}{}", "../".repeat(n), target)),
        (Some(_), 0) => Cow::Borrowed(shared(target)),
        (Some(_), n) => Cow::Owned(format!("{}{}", "../".repeat(n), shared(target))),
    }
}

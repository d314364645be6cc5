use std::borrow::Cow;

use getset::{CopyGetters, Getters, Setters};

const CHR_PREFIX: &str = "chr";

/// Construction-time settings of a pool.
#[derive(Debug, Clone, Default, Getters, CopyGetters, Setters)]
pub struct PoolConfig {
    /// Normalize chromosome names to carry (`true`) or drop (`false`) the
    /// `chr` prefix.
    #[getset(get_copy = "pub", set = "pub")]
    add_chr: bool,
    #[getset(get = "pub", set = "pub")]
    pool_id: String,
    /// Refuse to read a file without a tabix/CSI/tribble index next to it.
    #[getset(get_copy = "pub", set = "pub")]
    require_index: bool,
}

impl PoolConfig {
    pub fn new<S: Into<String>>(pool_id: S, add_chr: bool) -> Self {
        PoolConfig {
            add_chr,
            pool_id: pool_id.into(),
            require_index: false,
        }
    }

    pub fn normalize_chrom<'a>(&self, chrom: &'a str) -> Cow<'a, str> {
        let prefixed = chrom
            .get(..CHR_PREFIX.len())
            .map_or(false, |p| p.eq_ignore_ascii_case(CHR_PREFIX));
        match (self.add_chr, prefixed) {
            (true, false) => Cow::Owned(format!("{}{}", CHR_PREFIX, chrom)),
            (false, true) => Cow::Borrowed(&chrom[CHR_PREFIX.len()..]),
            _ => Cow::Borrowed(chrom),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_chr_is_idempotent() {
        let config = PoolConfig::new("pool", true);
        assert_eq!(config.normalize_chrom("2"), "chr2");
        assert_eq!(config.normalize_chrom(&config.normalize_chrom("2")), "chr2");
        assert_eq!(config.normalize_chrom("CHR2"), "CHR2");
    }

    #[test]
    fn test_strip_chr_is_idempotent() {
        let config = PoolConfig::new("pool", false);
        assert_eq!(config.normalize_chrom("chr2"), "2");
        assert_eq!(config.normalize_chrom(&config.normalize_chrom("chr2")), "2");
        assert_eq!(config.normalize_chrom("ChrX"), "X");
    }

    #[test]
    fn test_setters() {
        let mut config = PoolConfig::default();
        config.set_require_index(true).set_pool_id("p1".to_owned());
        assert!(config.require_index());
        assert_eq!(config.pool_id(), "p1");
        assert!(!config.add_chr());
    }
}

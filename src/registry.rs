//! Filter registry: maps a (filter, implementation) pair to a kernel.
//!
//! Lookups are pure reads. The built-in registry is created once and
//! never modified afterwards, so it can be shared across threads freely.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::core::SepiaStrength;
use crate::filters::{compiled, naive, vectorized};

// ============================================================================
// Names
// ============================================================================

/// Which color transform to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterName {
    #[serde(alias = "color2gray")]
    Gray,
    #[serde(alias = "color2sepia")]
    Sepia,
}

impl FilterName {
    pub const ALL: [FilterName; 2] = [FilterName::Gray, FilterName::Sepia];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterName::Gray => "gray",
            FilterName::Sepia => "sepia",
        }
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterName {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" | "grey" | "color2gray" => Ok(FilterName::Gray),
            "sepia" | "color2sepia" => Ok(FilterName::Sepia),
            _ => Err(FilterError::UnknownFilter(s.to_string())),
        }
    }
}

/// Execution strategy of a kernel. `Naive` is the reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    #[serde(alias = "python")]
    Naive,
    #[serde(alias = "numpy")]
    Vectorized,
    #[serde(alias = "numba")]
    Compiled,
}

impl Implementation {
    pub const ALL: [Implementation; 3] = [
        Implementation::Naive,
        Implementation::Vectorized,
        Implementation::Compiled,
    ];

    /// The baseline every other strategy is compared against.
    pub const REFERENCE: Implementation = Implementation::Naive;

    pub fn as_str(self) -> &'static str {
        match self {
            Implementation::Naive => "naive",
            Implementation::Vectorized => "vectorized",
            Implementation::Compiled => "compiled",
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Implementation {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" | "python" => Ok(Implementation::Naive),
            "vectorized" | "numpy" => Ok(Implementation::Vectorized),
            "compiled" | "numba" => Ok(Implementation::Compiled),
            _ => Err(FilterError::UnknownImplementation(s.to_string())),
        }
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// Kernel taking only the image.
pub type PlainFn = fn(&PixelBuffer) -> FilterResult<PixelBuffer>;

/// Kernel taking the image and a sepia strength.
pub type StrengthFn = fn(&PixelBuffer, SepiaStrength) -> FilterResult<PixelBuffer>;

#[derive(Clone, Copy)]
pub enum KernelFn {
    Plain(PlainFn),
    WithStrength(StrengthFn),
}

impl fmt::Debug for KernelFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelFn::Plain(_) => f.write_str("Plain"),
            KernelFn::WithStrength(_) => f.write_str("WithStrength"),
        }
    }
}

/// A resolved filter function together with the names it was registered under.
#[derive(Clone, Copy, Debug)]
pub struct Kernel {
    filter: FilterName,
    implementation: Implementation,
    func: KernelFn,
}

impl Kernel {
    pub fn new(filter: FilterName, implementation: Implementation, func: KernelFn) -> Self {
        Self {
            filter,
            implementation,
            func,
        }
    }

    pub fn filter(&self) -> FilterName {
        self.filter
    }

    pub fn implementation(&self) -> Implementation {
        self.implementation
    }

    /// Whether `apply_with_strength` accepts strengths other than 1.0.
    pub fn accepts_strength(&self) -> bool {
        matches!(self.func, KernelFn::WithStrength(_))
    }

    /// Run the kernel with its default parameters (full-strength sepia).
    pub fn apply(&self, input: &PixelBuffer) -> FilterResult<PixelBuffer> {
        match self.func {
            KernelFn::Plain(f) => f(input),
            KernelFn::WithStrength(f) => f(input, SepiaStrength::default()),
        }
    }

    /// Run the kernel with an explicit strength.
    ///
    /// Kernels without a strength parameter only accept `SepiaStrength::FULL`.
    pub fn apply_with_strength(
        &self,
        input: &PixelBuffer,
        strength: SepiaStrength,
    ) -> FilterResult<PixelBuffer> {
        match self.func {
            KernelFn::WithStrength(f) => f(input, strength),
            KernelFn::Plain(f) if strength.is_full() => f(input),
            KernelFn::Plain(_) => Err(FilterError::InvalidArgument(format!(
                "{} {} does not take a strength (got {})",
                self.implementation,
                self.filter,
                strength.value()
            ))),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct FilterRegistry {
    kernels: Vec<Kernel>,
}

impl FilterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry holding every shipped kernel.
    pub fn builtin() -> &'static FilterRegistry {
        static BUILTIN: OnceLock<FilterRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            use FilterName::*;
            use Implementation::*;

            FilterRegistry::new()
                .with(Kernel::new(Gray, Naive, KernelFn::Plain(naive::gray)))
                .with(Kernel::new(Sepia, Naive, KernelFn::Plain(naive::sepia)))
                .with(Kernel::new(Gray, Vectorized, KernelFn::Plain(vectorized::gray)))
                .with(Kernel::new(
                    Sepia,
                    Vectorized,
                    KernelFn::WithStrength(vectorized::sepia),
                ))
                .with(Kernel::new(Gray, Compiled, KernelFn::Plain(compiled::gray)))
                .with(Kernel::new(Sepia, Compiled, KernelFn::Plain(compiled::sepia)))
        })
    }

    /// Add a kernel, replacing any earlier one for the same pair.
    pub fn register(&mut self, kernel: Kernel) -> &mut Self {
        self.kernels.retain(|k| {
            (k.filter, k.implementation) != (kernel.filter, kernel.implementation)
        });
        self.kernels.push(kernel);
        self
    }

    pub fn with(mut self, kernel: Kernel) -> Self {
        self.register(kernel);
        self
    }

    pub fn get(&self, filter: FilterName, implementation: Implementation) -> Option<Kernel> {
        self.kernels
            .iter()
            .find(|k| k.filter == filter && k.implementation == implementation)
            .copied()
    }

    /// Look up the kernel for a pair.
    ///
    /// Fails with `UnsupportedCombination` when the pair is not registered.
    pub fn resolve(
        &self,
        filter: FilterName,
        implementation: Implementation,
    ) -> FilterResult<Kernel> {
        self.get(filter, implementation)
            .ok_or_else(|| FilterError::UnsupportedCombination {
                filter: filter.to_string(),
                implementation: implementation.to_string(),
            })
    }

    /// Look up by textual names. The filter name is checked first.
    pub fn resolve_by_name(&self, filter: &str, implementation: &str) -> FilterResult<Kernel> {
        let filter: FilterName = filter.parse()?;
        let implementation: Implementation = implementation.parse()?;
        self.resolve(filter, implementation)
    }

    /// Registered pairs, in registration order.
    pub fn available(&self) -> impl Iterator<Item = (FilterName, Implementation)> + '_ {
        self.kernels.iter().map(|k| (k.filter, k.implementation))
    }
}

/// Resolve a kernel from the built-in registry.
pub fn resolve(filter: FilterName, implementation: Implementation) -> FilterResult<Kernel> {
    FilterRegistry::builtin().resolve(filter, implementation)
}

/// Resolve a kernel from the built-in registry by name, e.g. `("color2gray", "numba")`.
pub fn get_filter(filter: &str, implementation: &str) -> FilterResult<Kernel> {
    FilterRegistry::builtin().resolve_by_name(filter, implementation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_fn(6, 9, 3, |(y, x, c)| (y * 40 + x * 25 + c * 7) as u8).unwrap()
    }

    #[test]
    fn test_names_parse_with_aliases() {
        assert_eq!("gray".parse::<FilterName>().unwrap(), FilterName::Gray);
        assert_eq!("color2sepia".parse::<FilterName>().unwrap(), FilterName::Sepia);
        assert_eq!(" Sepia ".parse::<FilterName>().unwrap(), FilterName::Sepia);

        assert_eq!("python".parse::<Implementation>().unwrap(), Implementation::Naive);
        assert_eq!("numpy".parse::<Implementation>().unwrap(), Implementation::Vectorized);
        assert_eq!("NUMBA".parse::<Implementation>().unwrap(), Implementation::Compiled);
    }

    #[test]
    fn test_builtin_has_every_pair() {
        let registry = FilterRegistry::builtin();
        for filter in FilterName::ALL {
            for implementation in Implementation::ALL {
                let kernel = registry.resolve(filter, implementation).unwrap();
                assert_eq!(kernel.filter(), filter);
                assert_eq!(kernel.implementation(), implementation);
            }
        }
        assert_eq!(registry.available().count(), 6);
    }

    #[test]
    fn test_resolve_gray_naive_matches_kernel() {
        let img = sample();
        let kernel = resolve(FilterName::Gray, Implementation::Naive).unwrap();
        assert_eq!(kernel.apply(&img).unwrap(), naive::gray(&img).unwrap());
    }

    #[test]
    fn test_unknown_names_are_distinguished() {
        assert!(matches!(
            get_filter("gray", "bogus"),
            Err(FilterError::UnknownImplementation(name)) if name == "bogus"
        ));
        assert!(matches!(
            get_filter("blur", "naive"),
            Err(FilterError::UnknownFilter(name)) if name == "blur"
        ));
        // Filter is validated first
        assert!(matches!(
            get_filter("blur", "bogus"),
            Err(FilterError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_unsupported_combination() {
        let registry = FilterRegistry::new().with(Kernel::new(
            FilterName::Gray,
            Implementation::Compiled,
            KernelFn::Plain(compiled::gray),
        ));

        assert!(registry.resolve(FilterName::Gray, Implementation::Compiled).is_ok());
        assert_eq!(
            registry.resolve(FilterName::Sepia, Implementation::Compiled).unwrap_err(),
            FilterError::UnsupportedCombination {
                filter: "sepia".to_string(),
                implementation: "compiled".to_string(),
            }
        );
    }

    #[test]
    fn test_register_replaces_pair() {
        let mut registry = FilterRegistry::new();
        registry
            .register(Kernel::new(FilterName::Gray, Implementation::Naive, KernelFn::Plain(naive::gray)))
            .register(Kernel::new(FilterName::Gray, Implementation::Naive, KernelFn::Plain(compiled::gray)));
        assert_eq!(registry.available().count(), 1);
    }

    #[test]
    fn test_strength_handling() {
        let img = sample();
        let half = SepiaStrength::new(0.5).unwrap();

        let vectorized = resolve(FilterName::Sepia, Implementation::Vectorized).unwrap();
        assert!(vectorized.accepts_strength());
        assert!(vectorized.apply_with_strength(&img, half).is_ok());

        let naive = resolve(FilterName::Sepia, Implementation::Naive).unwrap();
        assert!(!naive.accepts_strength());
        assert_eq!(
            naive.apply_with_strength(&img, SepiaStrength::FULL).unwrap(),
            naive.apply(&img).unwrap()
        );
        assert!(matches!(
            naive.apply_with_strength(&img, half),
            Err(FilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_concurrent_resolution() {
        let img = sample();
        let expected = naive::gray(&img).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        resolve(FilterName::Gray, Implementation::Compiled)
                            .and_then(|k| k.apply(&img))
                            .unwrap()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_names_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&FilterName::Sepia).unwrap(), "\"sepia\"");
        assert_eq!(
            serde_json::from_str::<Implementation>("\"numba\"").unwrap(),
            Implementation::Compiled
        );
    }
}

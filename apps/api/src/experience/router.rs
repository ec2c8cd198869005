//! Domain router: maps a requirement's role family to its calculator.
//!
//! Exact-match lookup. Unregistered families route to `ZeroCreditCalculator`
//! so an unmodeled family never silently grants credit.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::experience::calculators::{
    RoleYearCalculator, ZeroCreditCalculator, ENGINEERING_LEADERSHIP, PRODUCT_MANAGEMENT,
    RECRUITING, SALES,
};
use crate::experience::models::RoleRequirement;

#[derive(Clone, Default)]
pub struct DomainRouter {
    calculators: HashMap<String, Arc<dyn RoleYearCalculator>>,
}

impl DomainRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with the built-in families and their aliases.
    pub fn with_default_families() -> Self {
        let mut router = Self::new();

        let recruiting: Arc<dyn RoleYearCalculator> = Arc::new(RECRUITING);
        router.register("recruiting", recruiting.clone());
        router.register("recruiting-leadership", recruiting);

        router.register("product-management", Arc::new(PRODUCT_MANAGEMENT));

        let engineering: Arc<dyn RoleYearCalculator> = Arc::new(ENGINEERING_LEADERSHIP);
        router.register("engineering-leadership", engineering.clone());
        router.register("engineering", engineering);

        router.register("sales", Arc::new(SALES));
        router
    }

    /// Registers (or replaces) the calculator for a role family key.
    pub fn register(
        &mut self,
        role_family: impl Into<String>,
        calculator: Arc<dyn RoleYearCalculator>,
    ) {
        self.calculators.insert(role_family.into(), calculator);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_registered(&self, role_family: &str) -> bool {
        self.calculators.contains_key(role_family)
    }

    pub fn select(&self, requirement: &RoleRequirement) -> Arc<dyn RoleYearCalculator> {
        match self.calculators.get(&requirement.role_family) {
            Some(calculator) => Arc::clone(calculator),
            None => {
                warn!(
                    role_family = %requirement.role_family,
                    "unrecognized role family, routing to zero-credit calculator"
                );
                Arc::new(ZeroCreditCalculator::new(requirement.role_family.clone()))
            }
        }
    }

    /// Registered keys, sorted.
    pub fn families(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.calculators.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

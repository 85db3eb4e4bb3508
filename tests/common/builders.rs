//! Test data builders for creating descriptors

use dataedit_rs::Descriptor;
use serde_json::{json, Value};

/// Builder for package descriptors
pub struct PackageBuilder {
    name: String,
    resources: Vec<Value>,
    licenses: Vec<Value>,
}

impl PackageBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resources: Vec::new(),
            licenses: Vec::new(),
        }
    }

    pub fn resource(mut self, name: &str, path: &str) -> Self {
        self.resources
            .push(json!({"name": name, "type": "table", "path": path}));
        self
    }

    pub fn license(mut self, name: &str) -> Self {
        self.licenses.push(json!({"name": name}));
        self
    }

    pub fn build(self) -> Descriptor {
        Descriptor::from_value(json!({
            "name": self.name,
            "resources": self.resources,
            "licenses": self.licenses,
        }))
        .expect("package builder produces an object")
    }
}

/// Builder for resource descriptors
pub struct ResourceBuilder {
    name: String,
    path: String,
}

impl ResourceBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: format!("{name}.csv"),
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn build(self) -> Descriptor {
        Descriptor::from_value(json!({
            "name": self.name,
            "type": "table",
            "path": self.path,
        }))
        .expect("resource builder produces an object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_builder() {
        let package = PackageBuilder::new("pkg")
            .resource("cities", "cities.csv")
            .license("MIT")
            .build();

        assert_eq!(package.name(), "pkg");
        assert_eq!(
            package.get("resources"),
            Some(&json!([{"name": "cities", "type": "table", "path": "cities.csv"}]))
        );
    }
}

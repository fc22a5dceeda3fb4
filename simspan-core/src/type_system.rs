//! Declared annotation types and their constructors
//!
//! Annotation types are data: a [`TypeSystem`] maps declared names to
//! [`TypeHandle`]s, records single inheritance between types and keeps a
//! registry of constructor closures used to instantiate new annotations.
//! Abstract types have no constructor.

use crate::annotation::Annotation;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Opaque identifier of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(u32);

impl TypeHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the type in declaration order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Constructor closure registered for a concrete type
///
/// Receives the requested type and offsets; an `Err` carries the reason
/// construction failed.
pub type AnnotationConstructor =
    Arc<dyn Fn(TypeHandle, usize, usize) -> std::result::Result<Annotation, String> + Send + Sync>;

fn default_constructor() -> AnnotationConstructor {
    Arc::new(|type_handle, begin, end| Ok(Annotation::new(type_handle, begin, end)))
}

struct TypeEntry {
    name: String,
    supertype: Option<TypeHandle>,
    is_abstract: bool,
    constructor: Option<AnnotationConstructor>,
}

/// Set of declared annotation types
pub struct TypeSystem {
    types: Vec<TypeEntry>,
    by_name: HashMap<String, TypeHandle>,
}

impl fmt::Debug for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(|entry| &entry.name))
            .finish()
    }
}

impl TypeSystem {
    /// Start declaring a type system
    pub fn builder() -> TypeSystemBuilder {
        TypeSystemBuilder::default()
    }

    /// Build a type system from a parsed definition
    pub fn from_definition(definition: &TypeSystemDefinition) -> Result<Self> {
        let mut builder = Self::builder();
        for ty in &definition.types {
            builder.push(ty.name.clone(), ty.supertype.clone(), ty.is_abstract);
        }
        builder.build()
    }

    /// Parse a TOML type system definition
    ///
    /// ```toml
    /// [[types]]
    /// name = "Entity"
    /// abstract = true
    ///
    /// [[types]]
    /// name = "Person"
    /// supertype = "Entity"
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let definition: TypeSystemDefinition =
            toml::from_str(toml_str).map_err(|e| CoreError::Definition(e.to_string()))?;
        Self::from_definition(&definition)
    }

    /// Load a TOML type system definition from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Definition(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Resolve a declared type name
    pub fn resolve(&self, name: &str) -> Result<TypeHandle> {
        self.get(name).ok_or_else(|| CoreError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Look up a declared type name
    pub fn get(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    /// Name of a declared type
    pub fn name(&self, type_handle: TypeHandle) -> &str {
        &self.types[type_handle.index()].name
    }

    /// Direct supertype, if any
    pub fn supertype(&self, type_handle: TypeHandle) -> Option<TypeHandle> {
        self.types[type_handle.index()].supertype
    }

    /// Whether the type is abstract
    pub fn is_abstract(&self, type_handle: TypeHandle) -> bool {
        self.types[type_handle.index()].is_abstract
    }

    /// Whether `descendant` is `ancestor` or one of its (transitive) subtypes
    pub fn subsumes(&self, ancestor: TypeHandle, descendant: TypeHandle) -> bool {
        let mut current = Some(descendant);
        while let Some(ty) = current {
            if ty == ancestor {
                return true;
            }
            current = self.supertype(ty);
        }
        false
    }

    /// Constructor registered for a type
    pub fn constructor(&self, type_handle: TypeHandle) -> Result<AnnotationConstructor> {
        let entry = &self.types[type_handle.index()];
        entry
            .constructor
            .clone()
            .ok_or_else(|| CoreError::NotConstructible {
                name: entry.name.clone(),
            })
    }

    /// Declared types in declaration order
    pub fn handles(&self) -> impl Iterator<Item = TypeHandle> + '_ {
        (0..self.types.len()).map(TypeHandle::from_index)
    }

    /// Number of declared types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are declared
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

struct PendingType {
    name: String,
    supertype: Option<String>,
    is_abstract: bool,
}

/// Builder for [`TypeSystem`]
#[derive(Default)]
pub struct TypeSystemBuilder {
    pending: Vec<PendingType>,
    constructors: HashMap<String, AnnotationConstructor>,
}

impl TypeSystemBuilder {
    fn push(&mut self, name: String, supertype: Option<String>, is_abstract: bool) {
        self.pending.push(PendingType {
            name,
            supertype,
            is_abstract,
        });
    }

    /// Declare a concrete root type
    pub fn declare(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), None, false);
        self
    }

    /// Declare a concrete type inheriting from `supertype`
    pub fn declare_subtype(mut self, name: impl Into<String>, supertype: impl Into<String>) -> Self {
        self.push(name.into(), Some(supertype.into()), false);
        self
    }

    /// Declare an abstract root type
    pub fn declare_abstract(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), None, true);
        self
    }

    /// Replace the default constructor of a concrete type
    pub fn constructor<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(TypeHandle, usize, usize) -> std::result::Result<Annotation, String>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Validate declarations and build the type system
    pub fn build(mut self) -> Result<TypeSystem> {
        let mut by_name = HashMap::with_capacity(self.pending.len());
        for (index, pending) in self.pending.iter().enumerate() {
            if by_name
                .insert(pending.name.clone(), TypeHandle::from_index(index))
                .is_some()
            {
                return Err(CoreError::DuplicateType {
                    name: pending.name.clone(),
                });
            }
        }

        let mut types = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            let supertype = match &pending.supertype {
                Some(parent) => Some(by_name.get(parent).copied().ok_or_else(|| {
                    CoreError::UnknownType {
                        name: parent.clone(),
                    }
                })?),
                None => None,
            };
            let constructor = if pending.is_abstract {
                None
            } else {
                Some(
                    self.constructors
                        .remove(&pending.name)
                        .unwrap_or_else(default_constructor),
                )
            };
            types.push(TypeEntry {
                name: pending.name,
                supertype,
                is_abstract: pending.is_abstract,
                constructor,
            });
        }

        if let Some(name) = self.constructors.into_keys().next() {
            return Err(CoreError::UnknownType { name });
        }

        // Inheritance chains must terminate
        for start in 0..types.len() {
            let mut current = types[start].supertype;
            let mut steps = 0;
            while let Some(ty) = current {
                steps += 1;
                if steps > types.len() {
                    return Err(CoreError::Definition(format!(
                        "inheritance cycle involving '{}'",
                        types[start].name
                    )));
                }
                current = types[ty.index()].supertype;
            }
        }

        Ok(TypeSystem { types, by_name })
    }
}

/// Serialized form of a type system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSystemDefinition {
    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

/// One declared type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name
    pub name: String,
    /// Optional supertype name
    #[serde(default)]
    pub supertype: Option<String>,
    /// Abstract types cannot be instantiated
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

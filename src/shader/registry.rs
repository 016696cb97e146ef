use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::catalog::BuiltinStyle;
use super::descriptor::ShaderProgramDescriptor;
use super::uniform::UniformBlock;
use crate::error::OrbisError;
use crate::gpu::shader_composer::{
    has_entry_point, uniform_struct_members, ShaderComposer,
};

/// Bind group / binding of the per-orb `OrbUniforms` block.
pub const ORB_UNIFORM_GROUP: u32 = 1;
/// Binding index inside [`ORB_UNIFORM_GROUP`].
pub const ORB_UNIFORM_BINDING: u32 = 0;

/// Immutable catalog of orb shader programs.
///
/// Built once through [`RegistryBuilder`] and shared by `Arc`. Lookups never
/// fail: unknown ids resolve to the default program.
#[derive(Debug)]
pub struct ShaderRegistry {
    programs: FxHashMap<String, Arc<ShaderProgramDescriptor>>,
    order: Vec<String>,
    default_id: String,
}

impl ShaderRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with every [`BuiltinStyle`], `boveda_monte` as default.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryBuilder::build`] failures.
    pub fn builtin() -> Result<Self, OrbisError> {
        RegistryBuilder::with_builtins().build()
    }

    /// Program for `id`, or the default program (with a warning) when `id`
    /// is unknown.
    pub fn get(&self, id: &str) -> Arc<ShaderProgramDescriptor> {
        if let Some(program) = self.programs.get(id) {
            return Arc::clone(program);
        }
        log::warn!(
            "unknown shader program '{id}', falling back to '{}'",
            self.default_id
        );
        self.default_program()
    }

    /// Program for `id` without fallback.
    pub fn try_get(&self, id: &str) -> Option<&Arc<ShaderProgramDescriptor>> {
        self.programs.get(id)
    }

    /// The default program.
    pub fn default_program(&self) -> Arc<ShaderProgramDescriptor> {
        // `build` guarantees the default id is registered.
        self.programs
            .get(&self.default_id)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::new(BuiltinStyle::DEFAULT.descriptor()))
    }

    /// Id of the default program.
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered programs in registration order.
    pub fn programs(&self) -> impl Iterator<Item = &Arc<ShaderProgramDescriptor>> {
        self.order.iter().filter_map(|id| self.programs.get(id))
    }

    /// Number of registered programs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is registered (never the case after `build`).
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Collects programs and validates them into a [`ShaderRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    programs: Vec<ShaderProgramDescriptor>,
    default_id: Option<String>,
    validate_shaders: bool,
}

impl RegistryBuilder {
    /// Builder preloaded with every [`BuiltinStyle`].
    pub fn with_builtins() -> Self {
        BuiltinStyle::ALL
            .into_iter()
            .fold(Self::default(), |b, style| b.register(style.descriptor()))
            .default_id(BuiltinStyle::DEFAULT.id())
    }

    /// Add a program.
    #[must_use]
    pub fn register(mut self, program: ShaderProgramDescriptor) -> Self {
        self.programs.push(program);
        self
    }

    /// Program used for unknown ids. Defaults to the first registered.
    #[must_use]
    pub fn default_id(mut self, id: impl Into<String>) -> Self {
        self.default_id = Some(id.into());
        self
    }

    /// Also compose every program with `naga_oil` and check its
    /// `OrbUniforms` members against [`UniformBlock`].
    #[must_use]
    pub fn validate_shaders(mut self, enabled: bool) -> Self {
        self.validate_shaders = enabled;
        self
    }

    /// Validate and freeze.
    ///
    /// # Errors
    ///
    /// - [`OrbisError::DuplicateProgram`] for a repeated id
    /// - [`OrbisError::MissingDefaultProgram`] when the default id is not
    ///   registered (or nothing is)
    /// - [`OrbisError::InvalidSchema`] for a malformed uniform schema
    /// - [`OrbisError::ShaderCompose`] / [`OrbisError::UniformLayoutMismatch`]
    ///   when shader validation is enabled and a program fails it
    pub fn build(self) -> Result<ShaderRegistry, OrbisError> {
        let default_id = match self.default_id {
            Some(id) => id,
            None => self
                .programs
                .first()
                .map(|p| p.id.clone())
                .ok_or_else(|| OrbisError::MissingDefaultProgram(String::new()))?,
        };

        let mut composer = if self.validate_shaders {
            Some(ShaderComposer::new()?)
        } else {
            None
        };

        let mut programs = FxHashMap::default();
        let mut order = Vec::with_capacity(self.programs.len());
        for program in self.programs {
            if programs.contains_key(&program.id) {
                return Err(OrbisError::DuplicateProgram(program.id));
            }
            program.schema.validate().map_err(|reason| {
                OrbisError::InvalidSchema {
                    program: program.id.clone(),
                    reason,
                }
            })?;
            if let Some(composer) = composer.as_mut() {
                validate_program(composer, &program)?;
            }
            log::debug!("registered shader program '{}'", program.id);
            order.push(program.id.clone());
            let _ = programs.insert(program.id.clone(), Arc::new(program));
        }

        if !programs.contains_key(&default_id) {
            return Err(OrbisError::MissingDefaultProgram(default_id));
        }

        Ok(ShaderRegistry {
            programs,
            order,
            default_id,
        })
    }
}

/// Compose `program` and compare its uniform block to the Rust layout.
fn validate_program(
    composer: &mut ShaderComposer,
    program: &ShaderProgramDescriptor,
) -> Result<(), OrbisError> {
    let module = composer.compose_naga(&program.source, &program.file_path)?;
    for entry in ["vs_main", "fs_main"] {
        if !has_entry_point(&module, entry) {
            return Err(OrbisError::ShaderCompose {
                program: program.id.clone(),
                reason: format!("missing entry point '{entry}'"),
            });
        }
    }

    let members =
        uniform_struct_members(&module, ORB_UNIFORM_GROUP, ORB_UNIFORM_BINDING)
            .ok_or_else(|| OrbisError::UniformLayoutMismatch {
                program: program.id.clone(),
                reason: format!(
                    "no uniform struct at group({ORB_UNIFORM_GROUP}) \
                     binding({ORB_UNIFORM_BINDING})"
                ),
            })?;

    let expected = UniformBlock::FIELD_NAMES;
    if let Some(missing) = expected.iter().find(|n| !members.iter().any(|m| m == *n)) {
        return Err(OrbisError::UniformLayoutMismatch {
            program: program.id.clone(),
            reason: format!("missing member '{missing}'"),
        });
    }
    if let Some(extra) = members.iter().find(|m| !expected.contains(&m.as_str())) {
        return Err(OrbisError::UniformLayoutMismatch {
            program: program.id.clone(),
            reason: format!("unexpected member '{extra}'"),
        });
    }
    if members.iter().map(String::as_str).ne(expected.iter().copied()) {
        return Err(OrbisError::UniformLayoutMismatch {
            program: program.id.clone(),
            reason: "members declared out of order".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::rotation::RotationRule;

    fn custom(id: &str, source: &'static str) -> ShaderProgramDescriptor {
        ShaderProgramDescriptor::new(
            id,
            id,
            source,
            format!("{id}.wgsl"),
            BuiltinStyle::FleteSur.preset(),
            RotationRule::STILL,
        )
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        let registry = ShaderRegistry::builtin().unwrap();
        let program = registry.get("nonexistent_bank");
        assert_eq!(program.id, "boveda_monte");
        assert!(registry.try_get("nonexistent_bank").is_none());
    }

    #[test]
    fn builtin_order_and_len() {
        let registry = ShaderRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 8);
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids[0], "boveda_monte");
        assert_eq!(ids[7], "liquid_magnetic");
    }

    #[test]
    fn get_shares_one_descriptor() {
        let registry = ShaderRegistry::builtin().unwrap();
        let a = registry.get("azteca");
        let b = registry.get("azteca");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = RegistryBuilder::with_builtins()
            .register(BuiltinStyle::Azteca.descriptor())
            .build()
            .unwrap_err();
        assert!(matches!(err, OrbisError::DuplicateProgram(id) if id == "azteca"));
    }

    #[test]
    fn missing_default_is_rejected() {
        let err = RegistryBuilder::with_builtins()
            .default_id("nope")
            .build()
            .unwrap_err();
        assert!(matches!(err, OrbisError::MissingDefaultProgram(_)));
        assert!(ShaderRegistry::builder().build().is_err());
    }

    #[test]
    fn first_registered_is_default_without_explicit_id() {
        let registry = ShaderRegistry::builder()
            .register(BuiltinStyle::Leftie.descriptor())
            .register(BuiltinStyle::Profit.descriptor())
            .build()
            .unwrap();
        assert_eq!(registry.default_id(), "leftie");
    }

    #[test]
    fn builtin_shaders_validate_against_uniform_block() {
        let registry = RegistryBuilder::with_builtins()
            .validate_shaders(true)
            .build();
        assert!(registry.is_ok(), "{:?}", registry.err());
    }

    #[test]
    fn wrong_uniform_struct_is_reported() {
        const BROKEN: &str = r"
struct Thin { model: mat4x4<f32>, time: f32, intensity: f32 }
@group(1) @binding(0) var<uniform> orb: Thin;

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    return orb.model * vec4<f32>(f32(i), orb.time, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(orb.intensity);
}
";
        let err = RegistryBuilder::with_builtins()
            .register(custom("thin", BROKEN))
            .validate_shaders(true)
            .build()
            .unwrap_err();
        match err {
            OrbisError::UniformLayoutMismatch { program, reason } => {
                assert_eq!(program, "thin");
                assert!(reason.contains("color_primary"), "{reason}");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn missing_entry_point_is_reported() {
        const NO_FRAGMENT: &str = r"
#import orbis::orb_common::{VertexInput, VertexOutput, displace}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    return displace(in, 0.0);
}
";
        let err = RegistryBuilder::with_builtins()
            .register(custom("half", NO_FRAGMENT))
            .validate_shaders(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, OrbisError::ShaderCompose { .. }));
    }
}

use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::OrbisError;

/// `naga_oil` composer preloaded with the shared orb modules.
///
/// Programs pull shared code in with `#import orbis::noise::...`,
/// `#import orbis::orb_common::...` and `#import orbis::fullscreen::...`.
/// Composition yields `naga::Module` IR directly, so the same path serves
/// pipeline creation and GPU-free validation.
pub struct ShaderComposer {
    composer: Composer,
}

struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules, dependencies first.
const SHARED_MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
        file_path: "modules/fullscreen.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/noise.wgsl"),
        file_path: "modules/noise.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/orb_common.wgsl"),
        file_path: "modules/orb_common.wgsl",
    },
];

impl ShaderComposer {
    /// Build a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, OrbisError> {
        let mut composer = Composer::default();
        for m in SHARED_MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| OrbisError::ShaderCompose {
                    program: m.file_path.to_owned(),
                    reason: e.to_string(),
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `source` and wrap it in a `wgpu::ShaderModule`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] on any import or validation
    /// failure.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, OrbisError> {
        let module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }

    /// Compose `source` into naga IR without touching a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] on any import or validation
    /// failure.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, OrbisError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| OrbisError::ShaderCompose {
                program: file_path.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Member names of the uniform struct bound at `(group, binding)`, in
/// declaration order. `None` when nothing uniform is bound there or the
/// binding is not a struct.
pub fn uniform_struct_members(
    module: &naga::Module,
    group: u32,
    binding: u32,
) -> Option<Vec<String>> {
    let (_, var) = module.global_variables.iter().find(|(_, var)| {
        var.space == naga::AddressSpace::Uniform
            && var
                .binding
                .as_ref()
                .is_some_and(|b| b.group == group && b.binding == binding)
    })?;
    match &module.types[var.ty].inner {
        naga::TypeInner::Struct { members, .. } => Some(
            members
                .iter()
                .map(|m| m.name.clone().unwrap_or_default())
                .collect(),
        ),
        _ => None,
    }
}

/// Whether the module declares an entry point called `name`.
pub fn has_entry_point(module: &naga::Module, name: &str) -> bool {
    module.entry_points.iter().any(|ep| ep.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::UniformBlock;

    fn screen_sources() -> [(&'static str, &'static str); 3] {
        [
            (
                include_str!("../../assets/shaders/screen/bloom.wgsl"),
                "screen/bloom.wgsl",
            ),
            (
                include_str!("../../assets/shaders/screen/chromatic.wgsl"),
                "screen/chromatic.wgsl",
            ),
            (
                include_str!("../../assets/shaders/screen/vignette.wgsl"),
                "screen/vignette.wgsl",
            ),
        ]
    }

    #[test]
    fn screen_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, path) in screen_sources() {
            let module = composer
                .compose_naga(source, path)
                .unwrap_or_else(|e| panic!("{path}: {e}"));
            assert!(has_entry_point(&module, "vs_main"), "{path}");
            assert!(has_entry_point(&module, "fs_main"), "{path}");
        }
    }

    #[test]
    fn orb_uniform_struct_reflects_rust_layout() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(
                include_str!("../../assets/shaders/orbs/gold_liquid.wgsl"),
                "orbs/gold_liquid.wgsl",
            )
            .unwrap();
        let members = uniform_struct_members(&module, 1, 0).unwrap();
        assert_eq!(members, UniformBlock::FIELD_NAMES);
    }

    #[test]
    fn missing_binding_reflects_nothing() {
        let mut composer = ShaderComposer::new().unwrap();
        let (source, path) = screen_sources()[2];
        let module = composer.compose_naga(source, path).unwrap();
        assert!(uniform_struct_members(&module, 3, 0).is_none());
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("#import orbis::nope::thing\n", "broken.wgsl")
            .unwrap_err();
        assert!(matches!(err, OrbisError::ShaderCompose { .. }));
    }
}

//! Uniform types, CPU staging buffers, and the per-program binding table.
//!
//! A [`UniformBinding`] pairs a resolved GL location with a fixed-capacity
//! CPU staging buffer shaped by the uniform's declared [`UniformType`].
//! Updates are transcribed into the staging buffer first and only then
//! pushed to the GPU, so the buffer always holds the exact data the last
//! upload call saw. Everything except [`UniformBinding::upload`] is pure
//! CPU-side state and testable without a GL context.

use std::collections::HashMap;

use crate::error::ShaderError;

/// The GLSL data shapes a uniform can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// `int` scalar.
    Int,
    /// `float` scalar.
    Float,
    /// `vec2`, two packed floats.
    Vec2,
    /// `vec3`, three packed floats.
    Vec3,
    /// `vec4`, four packed floats.
    Vec4,
    /// `mat2`, column-major.
    Mat2,
    /// `mat3`, column-major.
    Mat3,
    /// `mat4`, column-major.
    Mat4,
}

impl UniformType {
    /// Capacity, in elements, of the staging buffer allocated for this type.
    ///
    /// Matrix capacities exceed the tight element count (mat2 = 8, mat3 = 12
    /// instead of 4 and 9): the extra room is headroom for the 4-float column
    /// slots some upload paths pack matrices into. The capacity is fixed for
    /// a binding's lifetime.
    pub const fn staging_len(self) -> usize {
        match self {
            UniformType::Int | UniformType::Float => 1,
            UniformType::Vec2 => 2,
            UniformType::Vec3 => 3,
            UniformType::Vec4 => 4,
            UniformType::Mat2 => 8,
            UniformType::Mat3 => 12,
            UniformType::Mat4 => 16,
        }
    }

    /// Number of elements actually transcribed and handed to the GL upload
    /// call: the tight column-major element count.
    pub const fn upload_len(self) -> usize {
        match self {
            UniformType::Int | UniformType::Float => 1,
            UniformType::Vec2 => 2,
            UniformType::Vec3 => 3,
            UniformType::Vec4 => 4,
            UniformType::Mat2 => 4,
            UniformType::Mat3 => 9,
            UniformType::Mat4 => 16,
        }
    }
}

impl std::fmt::Display for UniformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UniformType::Int => "int",
            UniformType::Float => "float",
            UniformType::Vec2 => "vec2",
            UniformType::Vec3 => "vec3",
            UniformType::Vec4 => "vec4",
            UniformType::Mat2 => "mat2",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 => "mat4",
        };
        f.write_str(name)
    }
}

/// A typed uniform value, one variant per supported shape.
///
/// Matrix variants carry the `transpose` flag the GL matrix upload takes.
/// The flag is passed through to the driver verbatim; it never changes how
/// the value is transcribed into the staging buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(glam::Vec2),
    Vec3(glam::Vec3),
    Vec4(glam::Vec4),
    Mat2 { value: glam::Mat2, transpose: bool },
    Mat3 { value: glam::Mat3, transpose: bool },
    Mat4 { value: glam::Mat4, transpose: bool },
}

impl UniformValue {
    /// The [`UniformType`] this value's shape corresponds to.
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Mat2 { .. } => UniformType::Mat2,
            UniformValue::Mat3 { .. } => UniformType::Mat3,
            UniformValue::Mat4 { .. } => UniformType::Mat4,
        }
    }

    /// The transpose flag for matrix values; `false` for every other shape.
    pub fn transpose(&self) -> bool {
        match self {
            UniformValue::Mat2 { transpose, .. }
            | UniformValue::Mat3 { transpose, .. }
            | UniformValue::Mat4 { transpose, .. } => *transpose,
            _ => false,
        }
    }
}

/// Fixed-capacity CPU staging storage, one variant per uniform shape.
///
/// The array lengths encode the documented capacities directly, so a
/// staging buffer can never be resized or end up with the wrong capacity
/// for its shape. Matrix buffers are larger than the tight element count;
/// writes fill the column-major prefix and leave the headroom untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Staging {
    Int([i32; 1]),
    Float([f32; 1]),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat2([f32; 8]),
    Mat3([f32; 12]),
    Mat4([f32; 16]),
}

impl Staging {
    /// Allocates zero-filled staging storage for the given type.
    pub fn new(ty: UniformType) -> Self {
        match ty {
            UniformType::Int => Staging::Int([0]),
            UniformType::Float => Staging::Float([0.0]),
            UniformType::Vec2 => Staging::Vec2([0.0; 2]),
            UniformType::Vec3 => Staging::Vec3([0.0; 3]),
            UniformType::Vec4 => Staging::Vec4([0.0; 4]),
            UniformType::Mat2 => Staging::Mat2([0.0; 8]),
            UniformType::Mat3 => Staging::Mat3([0.0; 12]),
            UniformType::Mat4 => Staging::Mat4([0.0; 16]),
        }
    }

    /// The [`UniformType`] this storage was allocated for.
    pub fn ty(&self) -> UniformType {
        match self {
            Staging::Int(_) => UniformType::Int,
            Staging::Float(_) => UniformType::Float,
            Staging::Vec2(_) => UniformType::Vec2,
            Staging::Vec3(_) => UniformType::Vec3,
            Staging::Vec4(_) => UniformType::Vec4,
            Staging::Mat2(_) => UniformType::Mat2,
            Staging::Mat3(_) => UniformType::Mat3,
            Staging::Mat4(_) => UniformType::Mat4,
        }
    }

    /// Capacity in elements. Always equals `self.ty().staging_len()`.
    pub fn len(&self) -> usize {
        match self {
            Staging::Int(b) => b.len(),
            Staging::Float(b) => b.len(),
            Staging::Vec2(b) => b.len(),
            Staging::Vec3(b) => b.len(),
            Staging::Vec4(b) => b.len(),
            Staging::Mat2(b) => b.len(),
            Staging::Mat3(b) => b.len(),
            Staging::Mat4(b) => b.len(),
        }
    }

    /// Staging buffers are never empty; this exists to pair with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The float contents, or `None` for `int` staging.
    pub fn floats(&self) -> Option<&[f32]> {
        match self {
            Staging::Int(_) => None,
            Staging::Float(b) => Some(b),
            Staging::Vec2(b) => Some(b),
            Staging::Vec3(b) => Some(b),
            Staging::Vec4(b) => Some(b),
            Staging::Mat2(b) => Some(b),
            Staging::Mat3(b) => Some(b),
            Staging::Mat4(b) => Some(b),
        }
    }
}

/// Associates a uniform's resolved GL location with its CPU staging buffer.
///
/// A binding with a `None` location is inert: it was registered for a name
/// the linked program does not expose, updates still transcribe into the
/// staging buffer but no GL call is issued for them.
#[derive(Debug)]
pub struct UniformBinding {
    location: Option<glow::UniformLocation>,
    staging: Staging,
}

impl UniformBinding {
    /// Creates a binding with a zero-filled staging buffer sized for `ty`.
    pub fn new(location: Option<glow::UniformLocation>, ty: UniformType) -> Self {
        Self {
            location,
            staging: Staging::new(ty),
        }
    }

    /// The resolved GL location, or `None` if the uniform was not found in
    /// the linked program.
    pub fn location(&self) -> Option<&glow::UniformLocation> {
        self.location.as_ref()
    }

    /// The type this binding was registered with.
    pub fn ty(&self) -> UniformType {
        self.staging.ty()
    }

    /// The staging storage, including any matrix headroom.
    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    /// The float staging contents, or `None` for an `int` binding.
    pub fn floats(&self) -> Option<&[f32]> {
        self.staging.floats()
    }

    /// Transcribes `value` into the staging buffer.
    ///
    /// Scalars and vectors fill the buffer exactly; matrices fill the tight
    /// column-major prefix and leave the headroom untouched. The matrix
    /// `transpose` flag plays no part here.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::UniformTypeMismatch`] if `value`'s shape does
    /// not match the registered type. The staging buffer is left unchanged.
    pub fn store(&mut self, name: &str, value: &UniformValue) -> Result<(), ShaderError> {
        match (&mut self.staging, value) {
            (Staging::Int(cell), UniformValue::Int(v)) => cell[0] = *v,
            (Staging::Float(cell), UniformValue::Float(v)) => cell[0] = *v,
            (Staging::Vec2(buf), UniformValue::Vec2(v)) => buf.copy_from_slice(&v.to_array()),
            (Staging::Vec3(buf), UniformValue::Vec3(v)) => buf.copy_from_slice(&v.to_array()),
            (Staging::Vec4(buf), UniformValue::Vec4(v)) => buf.copy_from_slice(&v.to_array()),
            (Staging::Mat2(buf), UniformValue::Mat2 { value, .. }) => {
                buf[..4].copy_from_slice(&value.to_cols_array());
            }
            (Staging::Mat3(buf), UniformValue::Mat3 { value, .. }) => {
                buf[..9].copy_from_slice(&value.to_cols_array());
            }
            (Staging::Mat4(buf), UniformValue::Mat4 { value, .. }) => {
                buf.copy_from_slice(&value.to_cols_array());
            }
            (staging, value) => {
                return Err(ShaderError::UniformTypeMismatch {
                    name: name.to_owned(),
                    expected: staging.ty(),
                    got: value.ty(),
                });
            }
        }
        Ok(())
    }

    /// Issues the GL upload call for this binding's shape, reading from the
    /// staging buffer. Matrix uploads pass `transpose` through verbatim and
    /// hand the driver the tight column-major prefix.
    ///
    /// A binding with a `None` location skips the call entirely.
    #[allow(unsafe_code)]
    pub fn upload(&self, gl: &glow::Context, transpose: bool) {
        use glow::HasContext;

        let Some(location) = self.location.as_ref() else {
            return;
        };

        // SAFETY: glow wraps raw GL calls as unsafe. The location was
        // resolved against a live program on this context, and each slice
        // length matches the element count the GL call expects.
        unsafe {
            match &self.staging {
                Staging::Int(cell) => gl.uniform_1_i32(Some(location), cell[0]),
                Staging::Float(cell) => gl.uniform_1_f32(Some(location), cell[0]),
                Staging::Vec2(buf) => gl.uniform_2_f32_slice(Some(location), buf),
                Staging::Vec3(buf) => gl.uniform_3_f32_slice(Some(location), buf),
                Staging::Vec4(buf) => gl.uniform_4_f32_slice(Some(location), buf),
                Staging::Mat2(buf) => {
                    gl.uniform_matrix_2_f32_slice(Some(location), transpose, &buf[..4]);
                }
                Staging::Mat3(buf) => {
                    gl.uniform_matrix_3_f32_slice(Some(location), transpose, &buf[..9]);
                }
                Staging::Mat4(buf) => {
                    gl.uniform_matrix_4_f32_slice(Some(location), transpose, buf);
                }
            }
        }
    }
}

/// Name-keyed table of uniform bindings owned by one program.
///
/// Each name maps to at most one binding; inserting under an existing name
/// replaces the prior binding.
#[derive(Debug, Default)]
pub struct UniformTable {
    bindings: HashMap<String, UniformBinding>,
}

impl UniformTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `binding` under `name`, replacing any prior binding for that name.
    pub fn insert(&mut self, name: impl Into<String>, binding: UniformBinding) {
        self.bindings.insert(name.into(), binding);
    }

    /// Looks up a binding by name.
    pub fn get(&self, name: &str) -> Option<&UniformBinding> {
        self.bindings.get(name)
    }

    /// Looks up a binding by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut UniformBinding> {
        self.bindings.get_mut(name)
    }

    /// Returns whether a binding is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of registered uniform names.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns whether the table holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over the registered uniform names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

    const ALL_TYPES: [UniformType; 8] = [
        UniformType::Int,
        UniformType::Float,
        UniformType::Vec2,
        UniformType::Vec3,
        UniformType::Vec4,
        UniformType::Mat2,
        UniformType::Mat3,
        UniformType::Mat4,
    ];

    // -- Staging capacity table --

    #[test]
    fn staging_len_matches_documented_capacities() {
        assert_eq!(UniformType::Int.staging_len(), 1);
        assert_eq!(UniformType::Float.staging_len(), 1);
        assert_eq!(UniformType::Vec2.staging_len(), 2);
        assert_eq!(UniformType::Vec3.staging_len(), 3);
        assert_eq!(UniformType::Vec4.staging_len(), 4);
        assert_eq!(UniformType::Mat2.staging_len(), 8);
        assert_eq!(UniformType::Mat3.staging_len(), 12);
        assert_eq!(UniformType::Mat4.staging_len(), 16);
    }

    #[test]
    fn upload_len_is_tight_column_major_count() {
        assert_eq!(UniformType::Mat2.upload_len(), 4);
        assert_eq!(UniformType::Mat3.upload_len(), 9);
        assert_eq!(UniformType::Mat4.upload_len(), 16);
        assert_eq!(UniformType::Vec3.upload_len(), 3);
        assert_eq!(UniformType::Int.upload_len(), 1);
    }

    #[test]
    fn staging_never_smaller_than_upload_for_any_type() {
        for ty in ALL_TYPES {
            assert!(
                ty.staging_len() >= ty.upload_len(),
                "staging smaller than upload for {ty}"
            );
        }
    }

    #[test]
    fn allocated_staging_capacity_matches_type_for_any_type() {
        for ty in ALL_TYPES {
            let binding = UniformBinding::new(None, ty);
            assert_eq!(
                binding.staging().len(),
                ty.staging_len(),
                "wrong capacity for {ty}"
            );
            assert_eq!(binding.ty(), ty);
        }
    }

    #[test]
    fn new_binding_is_zero_filled_with_inert_location() {
        let binding = UniformBinding::new(None, UniformType::Vec4);
        assert!(binding.location().is_none());
        assert_eq!(binding.floats().unwrap(), &[0.0; 4]);
    }

    // -- Transcription --

    #[test]
    fn vec3_store_writes_exact_components() {
        let mut binding = UniformBinding::new(None, UniformType::Vec3);
        binding
            .store("uColor", &UniformValue::Vec3(Vec3::new(1.0, 0.5, 0.25)))
            .unwrap();
        assert_eq!(binding.floats().unwrap(), &[1.0, 0.5, 0.25]);
    }

    #[test]
    fn vec2_and_vec4_store_exact_components() {
        let mut v2 = UniformBinding::new(None, UniformType::Vec2);
        v2.store("uOffset", &UniformValue::Vec2(Vec2::new(-1.0, 2.0)))
            .unwrap();
        assert_eq!(v2.floats().unwrap(), &[-1.0, 2.0]);

        let mut v4 = UniformBinding::new(None, UniformType::Vec4);
        v4.store("uTint", &UniformValue::Vec4(Vec4::new(0.1, 0.2, 0.3, 0.4)))
            .unwrap();
        assert_eq!(v4.floats().unwrap(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn scalar_stores_write_single_cell() {
        let mut i = UniformBinding::new(None, UniformType::Int);
        i.store("uMode", &UniformValue::Int(7)).unwrap();
        assert_eq!(binding_int(&i), 7);

        let mut f = UniformBinding::new(None, UniformType::Float);
        f.store("uScale", &UniformValue::Float(2.5)).unwrap();
        assert_eq!(f.floats().unwrap(), &[2.5]);
    }

    #[test]
    fn int_store_preserves_values_beyond_f32_precision() {
        // 2^24 + 1 is not representable as f32; the int cell must hold it exactly.
        let mut binding = UniformBinding::new(None, UniformType::Int);
        binding
            .store("uCount", &UniformValue::Int(16_777_217))
            .unwrap();
        assert_eq!(binding_int(&binding), 16_777_217);
    }

    #[test]
    fn mat2_store_fills_tight_prefix_and_leaves_headroom() {
        let mut binding = UniformBinding::new(None, UniformType::Mat2);
        let m = Mat2::from_cols(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        binding
            .store(
                "uRot",
                &UniformValue::Mat2 {
                    value: m,
                    transpose: false,
                },
            )
            .unwrap();
        let floats = binding.floats().unwrap();
        assert_eq!(floats.len(), 8, "mat2 staging capacity must stay 8");
        assert_eq!(&floats[..4], &[1.0, 2.0, 3.0, 4.0], "column-major prefix");
        assert_eq!(&floats[4..], &[0.0; 4], "headroom must stay untouched");
    }

    #[test]
    fn mat3_store_fills_tight_prefix_and_leaves_headroom() {
        let mut binding = UniformBinding::new(None, UniformType::Mat3);
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        binding
            .store(
                "uNormalMatrix",
                &UniformValue::Mat3 {
                    value: m,
                    transpose: false,
                },
            )
            .unwrap();
        let floats = binding.floats().unwrap();
        assert_eq!(floats.len(), 12, "mat3 staging capacity must stay 12");
        assert_eq!(
            &floats[..9],
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            "column-major prefix"
        );
        assert_eq!(&floats[9..], &[0.0; 3], "headroom must stay untouched");
    }

    #[test]
    fn mat4_staging_identical_for_both_transpose_flags() {
        let m = Mat4::from_cols(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        );

        let mut plain = UniformBinding::new(None, UniformType::Mat4);
        plain
            .store(
                "uProjection",
                &UniformValue::Mat4 {
                    value: m,
                    transpose: false,
                },
            )
            .unwrap();

        let mut transposed = UniformBinding::new(None, UniformType::Mat4);
        transposed
            .store(
                "uProjection",
                &UniformValue::Mat4 {
                    value: m,
                    transpose: true,
                },
            )
            .unwrap();

        // The transpose flag only reaches the GL call; the CPU write order
        // must be identical.
        assert_eq!(plain.floats().unwrap(), transposed.floats().unwrap());
    }

    #[test]
    fn store_overwrites_previous_value() {
        let mut binding = UniformBinding::new(None, UniformType::Vec2);
        binding
            .store("uOffset", &UniformValue::Vec2(Vec2::new(1.0, 1.0)))
            .unwrap();
        binding
            .store("uOffset", &UniformValue::Vec2(Vec2::new(-3.0, 4.5)))
            .unwrap();
        assert_eq!(binding.floats().unwrap(), &[-3.0, 4.5]);
    }

    #[test]
    fn type_mismatch_is_rejected_and_staging_untouched() {
        let mut binding = UniformBinding::new(None, UniformType::Vec3);
        binding
            .store("uColor", &UniformValue::Vec3(Vec3::new(0.9, 0.8, 0.7)))
            .unwrap();

        let err = binding
            .store("uColor", &UniformValue::Float(1.0))
            .unwrap_err();
        assert!(
            matches!(
                err,
                ShaderError::UniformTypeMismatch {
                    expected: UniformType::Vec3,
                    got: UniformType::Float,
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
        assert_eq!(
            binding.floats().unwrap(),
            &[0.9, 0.8, 0.7],
            "rejected update must not touch staging"
        );
    }

    // -- Value inspection --

    #[test]
    fn value_ty_maps_every_variant() {
        assert_eq!(UniformValue::Int(0).ty(), UniformType::Int);
        assert_eq!(UniformValue::Float(0.0).ty(), UniformType::Float);
        assert_eq!(UniformValue::Vec2(Vec2::ZERO).ty(), UniformType::Vec2);
        assert_eq!(UniformValue::Vec3(Vec3::ZERO).ty(), UniformType::Vec3);
        assert_eq!(UniformValue::Vec4(Vec4::ZERO).ty(), UniformType::Vec4);
        assert_eq!(
            UniformValue::Mat2 {
                value: Mat2::IDENTITY,
                transpose: false
            }
            .ty(),
            UniformType::Mat2
        );
        assert_eq!(
            UniformValue::Mat3 {
                value: Mat3::IDENTITY,
                transpose: false
            }
            .ty(),
            UniformType::Mat3
        );
        assert_eq!(
            UniformValue::Mat4 {
                value: Mat4::IDENTITY,
                transpose: false
            }
            .ty(),
            UniformType::Mat4
        );
    }

    #[test]
    fn transpose_flag_only_set_for_matrices() {
        let m = UniformValue::Mat4 {
            value: Mat4::IDENTITY,
            transpose: true,
        };
        assert!(m.transpose());
        assert!(!UniformValue::Vec3(Vec3::ONE).transpose());
        assert!(!UniformValue::Int(3).transpose());
    }

    #[test]
    fn uniform_type_display_uses_glsl_names() {
        assert_eq!(UniformType::Int.to_string(), "int");
        assert_eq!(UniformType::Vec3.to_string(), "vec3");
        assert_eq!(UniformType::Mat4.to_string(), "mat4");
    }

    // -- Binding table --

    #[test]
    fn insert_same_name_replaces_prior_binding() {
        let mut table = UniformTable::new();
        table.insert("uValue", UniformBinding::new(None, UniformType::Float));
        table.insert("uValue", UniformBinding::new(None, UniformType::Vec4));

        assert_eq!(table.len(), 1, "re-registration must not add an entry");
        assert_eq!(table.get("uValue").unwrap().ty(), UniformType::Vec4);
    }

    #[test]
    fn lookup_of_unregistered_name_returns_none() {
        let mut table = UniformTable::new();
        table.insert("uColor", UniformBinding::new(None, UniformType::Vec3));
        assert!(table.get("uColour").is_none());
        assert!(!table.contains("uColour"));
        assert!(table.contains("uColor"));
    }

    #[test]
    fn updating_one_binding_does_not_disturb_others() {
        let mut table = UniformTable::new();
        table.insert("uColor", UniformBinding::new(None, UniformType::Vec3));
        table.insert("uScale", UniformBinding::new(None, UniformType::Float));

        table
            .get_mut("uColor")
            .unwrap()
            .store("uColor", &UniformValue::Vec3(Vec3::new(1.0, 0.5, 0.25)))
            .unwrap();

        table
            .get_mut("uScale")
            .unwrap()
            .store("uScale", &UniformValue::Float(9.0))
            .unwrap();

        assert_eq!(table.len(), 2, "updates must not change the name set");
        assert_eq!(
            table.get("uColor").unwrap().floats().unwrap(),
            &[1.0, 0.5, 0.25],
            "uColor staging disturbed by uScale update"
        );
        assert_eq!(table.get("uScale").unwrap().floats().unwrap(), &[9.0]);
    }

    #[test]
    fn names_iterates_all_registered_uniforms() {
        let mut table = UniformTable::new();
        table.insert("uA", UniformBinding::new(None, UniformType::Int));
        table.insert("uB", UniformBinding::new(None, UniformType::Mat2));

        let mut names: Vec<&str> = table.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["uA", "uB"]);
    }

    /// Reads the int staging cell of a binding known to be `Int`-typed.
    fn binding_int(binding: &UniformBinding) -> i32 {
        match binding.staging() {
            Staging::Int(cell) => cell[0],
            other => panic!("expected int staging, got {:?}", other.ty()),
        }
    }

    // ── Property-based tests ───────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn vec3_staging_always_equals_components(
                x in -1e6f32..1e6,
                y in -1e6f32..1e6,
                z in -1e6f32..1e6,
            ) {
                let mut binding = UniformBinding::new(None, UniformType::Vec3);
                binding.store("uColor", &UniformValue::Vec3(Vec3::new(x, y, z))).unwrap();
                prop_assert_eq!(binding.floats().unwrap(), &[x, y, z]);
            }

            #[test]
            fn mat4_capacity_invariant_under_any_store(seed in -100.0f32..100.0) {
                let mut binding = UniformBinding::new(None, UniformType::Mat4);
                let m = Mat4::from_cols_array(&[seed; 16]);
                binding.store("uM", &UniformValue::Mat4 { value: m, transpose: false }).unwrap();
                prop_assert_eq!(binding.staging().len(), 16);
            }

            #[test]
            fn mismatched_store_never_changes_staging(v in -100.0f32..100.0) {
                let mut binding = UniformBinding::new(None, UniformType::Vec2);
                binding.store("uV", &UniformValue::Vec2(Vec2::new(v, -v))).unwrap();
                let before = binding.staging().clone();
                prop_assert!(binding.store("uV", &UniformValue::Float(v)).is_err());
                prop_assert_eq!(binding.staging(), &before);
            }
        }
    }
}

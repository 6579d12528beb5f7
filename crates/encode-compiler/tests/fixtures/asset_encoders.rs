// Code generated by protoc-gen-encode. DO NOT EDIT.

#[allow(dead_code, non_camel_case_types, unused_mut, unused_variables, clippy::all)]
pub mod encode {
    /// Error returned by every conversion function.
    pub type EncodeError = Box<dyn ::std::error::Error + Send + Sync>;

    /// Produces `media.v2.Asset.signature` (bytes), which has no input counterpart.
    pub type MediaV1AssetToMediaV2AssetSignatureEncoder<C> = Box<dyn Fn(&C) -> Result<Option<Vec<u8>>, EncodeError>>;

    /// Converts `media.v1.Asset` into `media.v2.Asset`.
    ///
    /// Common fields are copied unchanged. Every other output field is produced
    /// by the function passed to [`MediaV1AssetToMediaV2AssetEncoder::new`].
    pub struct MediaV1AssetToMediaV2AssetEncoder<C> {
        pub data: Box<dyn Fn(Option<Vec<u8>>, &C) -> Result<Vec<u8>, EncodeError>>,
        pub thumbnail: Box<dyn Fn(Vec<u8>, &C) -> Result<Option<Vec<u8>>, EncodeError>>,
        pub checksum: Box<dyn Fn(Option<Vec<u8>>, &C) -> Result<Option<Vec<u8>>, EncodeError>>,
        pub preview: Box<dyn Fn(Vec<u8>, &C) -> Result<Option<Vec<u8>>, EncodeError>>,
        pub signature: MediaV1AssetToMediaV2AssetSignatureEncoder<C>,
    }

    impl<C: 'static> MediaV1AssetToMediaV2AssetEncoder<C> {
        /// Wires the caller's conversions. Common fields convert by identity.
        ///
        /// An absent `data` becomes empty.
        ///
        /// An empty `thumbnail` becomes absent.
        ///
        /// An empty `preview` becomes absent.
        pub fn new(
            signature: MediaV1AssetToMediaV2AssetSignatureEncoder<C>,
        ) -> Self {
            Self {
                data: Box::new(|value: Option<Vec<u8>>, _ctx: &C| -> Result<Vec<u8>, EncodeError> { Ok(value.unwrap_or_default()) }),
                thumbnail: Box::new(|value: Vec<u8>, _ctx: &C| -> Result<Option<Vec<u8>>, EncodeError> { Ok((!value.is_empty()).then_some(value)) }),
                checksum: Box::new(|value: Option<Vec<u8>>, _ctx: &C| -> Result<Option<Vec<u8>>, EncodeError> { Ok(value) }),
                preview: Box::new(|value: Vec<u8>, _ctx: &C| -> Result<Option<Vec<u8>>, EncodeError> { Ok((!value.is_empty()).then_some(value)) }),
                signature,
            }
        }
    }

    impl<C> MediaV1AssetToMediaV2AssetEncoder<C> {
        /// Converts `input`, stopping at the first failing field function.
        #[allow(clippy::field_reassign_with_default)]
        pub fn encode(&self, input: crate::pb::media::v1::Asset, ctx: &C) -> Result<crate::pb::media::v2::Asset, EncodeError> {
            let mut input = input;
            let mut out = crate::pb::media::v2::Asset::default();

            let data_out = (self.data)(input.data, ctx)?;
            out.data = data_out;

            let thumbnail_out = (self.thumbnail)(input.thumbnail, ctx)?;
            out.thumbnail = thumbnail_out;

            let checksum_out = (self.checksum)(input.checksum, ctx)?;
            out.checksum = checksum_out;

            let preview_in = match input.source.take() {
                Some(crate::pb::media::v1::asset::Source::Preview(value)) => value,
                other => {
                    input.source = other;
                    Default::default()
                }
            };
            let preview_out = (self.preview)(preview_in, ctx)?;
            out.preview = preview_out;

            let signature_out = (self.signature)(ctx)?;
            out.signature = signature_out;

            Ok(out)
        }
    }

    /// Acknowledges that `media.v1.Layout.LAYOUT_3D` has no counterpart in `media.v2.Layout`.
    pub struct MediaV1LayoutToMediaV2LayoutLayout3dAckMissing;

    /// Overrides the converted value. Returning `None` keeps the value matched by name.
    pub type MediaV1LayoutToMediaV2LayoutExtraEncoder<C> = Box<dyn Fn(&C) -> Result<Option<crate::pb::media::v2::Layout>, EncodeError>>;

    /// Converts `media.v1.Layout` values into `media.v2.Layout` values.
    pub struct MediaV1LayoutToMediaV2LayoutEncoder<C> {
        pub extra_encoder: MediaV1LayoutToMediaV2LayoutExtraEncoder<C>,
    }

    impl<C> MediaV1LayoutToMediaV2LayoutEncoder<C> {
        pub fn new(
            extra_encoder: MediaV1LayoutToMediaV2LayoutExtraEncoder<C>,
            _layout_3d: MediaV1LayoutToMediaV2LayoutLayout3dAckMissing,
        ) -> Self {
            Self { extra_encoder }
        }

        pub fn encode(&self, input: crate::pb::media::v1::Layout, ctx: &C) -> Result<crate::pb::media::v2::Layout, EncodeError> {
            let out = match input {
                crate::pb::media::v1::Layout::Unknown => crate::pb::media::v2::Layout::Unknown,
                crate::pb::media::v1::Layout::Layout2d => crate::pb::media::v2::Layout::Layout2d,
                _ => crate::pb::media::v2::Layout::default(),
            };
            Ok((self.extra_encoder)(ctx)?.unwrap_or(out))
        }
    }
}

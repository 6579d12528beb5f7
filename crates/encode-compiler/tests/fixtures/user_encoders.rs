// Code generated by protoc-gen-encode. DO NOT EDIT.

#[allow(dead_code, non_camel_case_types, unused_mut, unused_variables, clippy::all)]
pub mod encode {
    /// Error returned by every conversion function.
    pub type EncodeError = Box<dyn ::std::error::Error + Send + Sync>;

    /// Converts `acme.v1.User.status` (acme.v1.Status) into `acme.v2.User.status` (acme.v2.Status).
    pub type AcmeV1UserToAcmeV2UserStatusEncoder<C> = Box<dyn Fn(i32, &C) -> Result<i32, EncodeError>>;

    /// Converts `acme.v1.User.phone` (optional string) into `acme.v2.User.phone` (string).
    pub type AcmeV1UserToAcmeV2UserPhoneEncoder<C> = Box<dyn Fn(Option<String>, &C) -> Result<String, EncodeError>>;

    /// Acknowledges that `acme.v1.User.legacy_code` is not carried into `acme.v2.User`.
    pub struct AcmeV1UserToAcmeV2UserLegacyCodeAckMissing;

    /// Produces `acme.v2.User.nickname` (string), which has no input counterpart.
    pub type AcmeV1UserToAcmeV2UserNicknameEncoder<C> = Box<dyn Fn(&C) -> Result<String, EncodeError>>;

    /// Converts `acme.v1.User` into `acme.v2.User`.
    ///
    /// Common fields are copied unchanged. Every other output field is produced
    /// by the function passed to [`AcmeV1UserToAcmeV2UserEncoder::new`].
    pub struct AcmeV1UserToAcmeV2UserEncoder<C> {
        pub id: Box<dyn Fn(i64, &C) -> Result<i64, EncodeError>>,
        pub name: Box<dyn Fn(String, &C) -> Result<String, EncodeError>>,
        pub status: AcmeV1UserToAcmeV2UserStatusEncoder<C>,
        pub email: Box<dyn Fn(Option<String>, &C) -> Result<Option<String>, EncodeError>>,
        pub phone: AcmeV1UserToAcmeV2UserPhoneEncoder<C>,
        pub avatar: Box<dyn Fn(Vec<u8>, &C) -> Result<Vec<u8>, EncodeError>>,
        pub nickname: AcmeV1UserToAcmeV2UserNicknameEncoder<C>,
    }

    impl<C: 'static> AcmeV1UserToAcmeV2UserEncoder<C> {
        /// Wires the caller's conversions. Common fields convert by identity.
        pub fn new(
            status: AcmeV1UserToAcmeV2UserStatusEncoder<C>,
            phone: AcmeV1UserToAcmeV2UserPhoneEncoder<C>,
            _legacy_code: AcmeV1UserToAcmeV2UserLegacyCodeAckMissing,
            nickname: AcmeV1UserToAcmeV2UserNicknameEncoder<C>,
        ) -> Self {
            Self {
                id: Box::new(|value: i64, _ctx: &C| -> Result<i64, EncodeError> { Ok(value) }),
                name: Box::new(|value: String, _ctx: &C| -> Result<String, EncodeError> { Ok(value) }),
                status,
                email: Box::new(|value: Option<String>, _ctx: &C| -> Result<Option<String>, EncodeError> { Ok(value) }),
                phone,
                avatar: Box::new(|value: Vec<u8>, _ctx: &C| -> Result<Vec<u8>, EncodeError> { Ok(value) }),
                nickname,
            }
        }
    }

    impl<C> AcmeV1UserToAcmeV2UserEncoder<C> {
        /// Converts `input`, stopping at the first failing field function.
        ///
        /// An empty `avatar` leaves `media` unset.
        #[allow(clippy::field_reassign_with_default)]
        pub fn encode(&self, input: crate::pb::acme::v1::User, ctx: &C) -> Result<crate::pb::acme::v2::User, EncodeError> {
            let mut input = input;
            let mut out = crate::pb::acme::v2::User::default();

            let id_out = (self.id)(input.id, ctx)?;
            out.id = id_out;

            let name_out = (self.name)(input.name, ctx)?;
            out.name = name_out;

            let status_out = (self.status)(input.status, ctx)?;
            out.status = status_out;

            let email_in = match input.contact.take() {
                Some(crate::pb::acme::v1::user::Contact::Email(value)) => Some(value),
                other => {
                    input.contact = other;
                    None
                }
            };
            let email_out = (self.email)(email_in, ctx)?;
            out.email = email_out;

            let phone_in = match input.contact.take() {
                Some(crate::pb::acme::v1::user::Contact::Phone(value)) => Some(value),
                other => {
                    input.contact = other;
                    None
                }
            };
            let phone_out = (self.phone)(phone_in, ctx)?;
            out.phone = phone_out;

            let avatar_out = (self.avatar)(input.avatar, ctx)?;
            if !avatar_out.is_empty() {
                out.media = Some(crate::pb::acme::v2::user::Media::Avatar(avatar_out));
            }

            let nickname_out = (self.nickname)(ctx)?;
            out.nickname = nickname_out;

            Ok(out)
        }
    }

    /// Acknowledges that `acme.v1.Status.STATUS_BANNED` has no counterpart in `acme.v2.Status`.
    pub struct AcmeV1StatusToAcmeV2StatusStatusBannedAckMissing;

    /// Overrides the converted value. Returning `None` keeps the value matched by name.
    pub type AcmeV1StatusToAcmeV2StatusExtraEncoder<C> = Box<dyn Fn(&C) -> Result<Option<crate::pb::acme::v2::Status>, EncodeError>>;

    /// Converts `acme.v1.Status` values into `acme.v2.Status` values.
    pub struct AcmeV1StatusToAcmeV2StatusEncoder<C> {
        pub extra_encoder: AcmeV1StatusToAcmeV2StatusExtraEncoder<C>,
    }

    impl<C> AcmeV1StatusToAcmeV2StatusEncoder<C> {
        pub fn new(
            extra_encoder: AcmeV1StatusToAcmeV2StatusExtraEncoder<C>,
            _status_banned: AcmeV1StatusToAcmeV2StatusStatusBannedAckMissing,
        ) -> Self {
            Self { extra_encoder }
        }

        pub fn encode(&self, input: crate::pb::acme::v1::Status, ctx: &C) -> Result<crate::pb::acme::v2::Status, EncodeError> {
            let out = match input {
                crate::pb::acme::v1::Status::Unknown => crate::pb::acme::v2::Status::Unknown,
                crate::pb::acme::v1::Status::Active => crate::pb::acme::v2::Status::Active,
                _ => crate::pb::acme::v2::Status::default(),
            };
            Ok((self.extra_encoder)(ctx)?.unwrap_or(out))
        }
    }
}

//! Cast member persistence contract.

use catalog_core::repository::Repository;

use super::cast_member::CastMember;

/// The generic repository contract specialized to cast members.
pub trait CastMemberRepository: Repository<CastMember> {}

impl<T> CastMemberRepository for T where T: Repository<CastMember> {}

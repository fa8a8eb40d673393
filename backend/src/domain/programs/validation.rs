//! Program draft validation.

use super::program::{Capacity, CommunityLink, DESCRIPTION_MAX, Subject};
use super::{Program, ProgramDraft, ProgramValidationError};

impl TryFrom<ProgramDraft> for Program {
    type Error = ProgramValidationError;

    fn try_from(value: ProgramDraft) -> Result<Self, Self::Error> {
        let subject = Subject::new(&value.subject)?;
        let description = normalise_description(value.description)?;
        let community_link = CommunityLink::new(&value.community_link)?;
        let capacity = Capacity::new(value.capacity)?;

        Ok(Self {
            id: value.id,
            mentor_id: value.mentor_id,
            subject,
            description,
            community_link,
            capacity,
            active: value.active,
            created_at: value.created_at,
        })
    }
}

fn normalise_description(
    description: Option<String>,
) -> Result<Option<String>, ProgramValidationError> {
    let Some(raw) = description else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > DESCRIPTION_MAX {
        return Err(ProgramValidationError::DescriptionTooLong {
            max: DESCRIPTION_MAX,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

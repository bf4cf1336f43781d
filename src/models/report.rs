use crate::error::SeedError;

/// HTTP status on success, the reason otherwise.
pub type StepResult = Result<u16, SeedError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSource {
    IdentityApi,
    Fallback,
}

#[derive(Debug)]
pub enum ProfileOutcome {
    Updated { status: u16 },
    /// No token after signin; no request was sent.
    Skipped,
    Failed(SeedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Generated,
    Registered,
    RegistrationFailed,
    Authenticated,
    AuthFailed,
    ProfileUpdated,
    ProfileSkipped,
    ProfileFailed,
}

#[derive(Debug)]
pub struct RecordReport {
    pub username: String,
    pub registration: Option<StepResult>,
    pub authentication: Option<StepResult>,
    pub profile: Option<ProfileOutcome>,
}

impl RecordReport {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            registration: None,
            authentication: None,
            profile: None,
        }
    }

    /// Furthest state the record reached.
    pub fn state(&self) -> RecordState {
        if let Some(profile) = &self.profile {
            return match profile {
                ProfileOutcome::Updated { .. } => RecordState::ProfileUpdated,
                ProfileOutcome::Skipped => RecordState::ProfileSkipped,
                ProfileOutcome::Failed(_) => RecordState::ProfileFailed,
            };
        }
        if let Some(auth) = &self.authentication {
            return match auth {
                Ok(_) => RecordState::Authenticated,
                Err(_) => RecordState::AuthFailed,
            };
        }
        match &self.registration {
            Some(Ok(_)) => RecordState::Registered,
            Some(Err(_)) => RecordState::RegistrationFailed,
            None => RecordState::Generated,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub generated: usize,
    pub registered: usize,
    pub authenticated: usize,
    pub profiles_updated: usize,
    pub profiles_skipped: usize,
    pub profiles_failed: usize,
}

#[derive(Debug)]
pub struct SeedReport {
    pub source: UserSource,
    pub records: Vec<RecordReport>,
}

impl SeedReport {
    pub fn summary(&self) -> SeedSummary {
        let mut summary = SeedSummary {
            generated: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            if matches!(record.registration, Some(Ok(_))) {
                summary.registered += 1;
            }
            if matches!(record.authentication, Some(Ok(_))) {
                summary.authenticated += 1;
            }
            match record.profile {
                Some(ProfileOutcome::Updated { .. }) => summary.profiles_updated += 1,
                Some(ProfileOutcome::Skipped) => summary.profiles_skipped += 1,
                Some(ProfileOutcome::Failed(_)) => summary.profiles_failed += 1,
                None => {}
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_furthest_step() {
        let mut report = RecordReport::new("ada");
        assert_eq!(report.state(), RecordState::Generated);

        report.registration = Some(Err(SeedError::Status {
            status: 409,
            body: "taken".to_string(),
        }));
        assert_eq!(report.state(), RecordState::RegistrationFailed);

        report.authentication = Some(Ok(200));
        assert_eq!(report.state(), RecordState::Authenticated);

        report.profile = Some(ProfileOutcome::Updated { status: 200 });
        assert_eq!(report.state(), RecordState::ProfileUpdated);
    }

    #[test]
    fn summary_counts_each_step() {
        let mut ok = RecordReport::new("a");
        ok.registration = Some(Ok(201));
        ok.authentication = Some(Ok(200));
        ok.profile = Some(ProfileOutcome::Updated { status: 200 });

        let mut skipped = RecordReport::new("b");
        skipped.registration = Some(Ok(201));
        skipped.authentication = Some(Err(SeedError::MissingToken));
        skipped.profile = Some(ProfileOutcome::Skipped);

        let report = SeedReport {
            source: UserSource::Fallback,
            records: vec![ok, skipped],
        };
        assert_eq!(
            report.summary(),
            SeedSummary {
                generated: 2,
                registered: 2,
                authenticated: 1,
                profiles_updated: 1,
                profiles_skipped: 1,
                profiles_failed: 0,
            }
        );
    }
}

use super::Location;

/// Profile fields sent to `PUT /users/profile`. Built per request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePayload {
    pub gender: String,
    pub sexual_preferences: Vec<String>,
    pub biography: String,
    pub interests: Vec<String>,
    pub authorize_location: bool,
    pub location: Location,
    pub pictures: Vec<String>,
    pub profile_picture: String,
}

impl ProfilePayload {
    /// Form fields in the shape the profile endpoint expects: nested values are
    /// JSON strings, list values repeat their `[]` key once per entry.
    pub fn to_form_fields(&self) -> serde_json::Result<Vec<(String, String)>> {
        let mut fields = vec![
            ("gender".to_string(), self.gender.clone()),
            ("biography".to_string(), self.biography.clone()),
            (
                "authorizeLocation".to_string(),
                self.authorize_location.to_string(),
            ),
            ("location".to_string(), serde_json::to_string(&self.location)?),
            ("pictures".to_string(), serde_json::to_string(&self.pictures)?),
            ("profilePicture".to_string(), self.profile_picture.clone()),
        ];
        fields.extend(
            self.interests
                .iter()
                .map(|i| ("interests[]".to_string(), i.clone())),
        );
        fields.extend(
            self.sexual_preferences
                .iter()
                .map(|p| ("sexualPreferences[]".to_string(), p.clone())),
        );
        Ok(fields)
    }
}

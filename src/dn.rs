//! Splitting of subject/issuer strings into attribute-type/value pairs.

/// Attribute types that decoders may introduce with `/` even inside an
/// otherwise comma-separated name.
const SLASH_INTRODUCED_TYPES: [&str; 3] = ["emailAddress", "serialNumber", "unstructuredName"];

/// A subject or issuer name decomposed into its attributes.
///
/// Attributes keep the order of their first occurrence. A type that appears
/// twice keeps its first position and takes the later value.
///
/// # Example
/// ```
/// use certmeta::dn::DistinguishedName;
/// let dn = DistinguishedName::split("C=GB,O=Example,CN=localhost/emailAddress=a@b.c");
/// assert_eq!(dn.get("CN"), Some("localhost"));
/// assert_eq!(dn.get("emailAddress"), Some("a@b.c"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    attributes: Vec<(String, String)>,
}

impl DistinguishedName {
    /// Splits a comma-joined `Type=Value` string.
    ///
    /// Each segment is split on its first `=` only, so values may contain `=`.
    /// Segments without any `=` are dropped.
    pub fn split(dn: &str) -> Self {
        let mut normalized = dn.to_string();
        for attribute_type in SLASH_INTRODUCED_TYPES {
            normalized = normalized.replace(
                &format!("/{attribute_type}="),
                &format!(",{attribute_type}="),
            );
        }

        let mut name = DistinguishedName::default();
        for segment in normalized.split(',') {
            if let Some((attribute_type, value)) = segment.split_once('=') {
                name.insert(attribute_type, value);
            }
        }
        name
    }

    fn insert(&mut self, attribute_type: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|(existing, _)| existing == attribute_type)
        {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self
                .attributes
                .push((attribute_type.to_string(), value.to_string())),
        }
    }

    /// Returns the value of an attribute type, if present.
    pub fn get(&self, attribute_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == attribute_type)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(type, value)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(attribute_type, value)| (attribute_type.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Collapses the separator spacing decoders put into printed names.
///
/// `C = GB, ST = Yorks` and `C=GB, ST=Yorks` both become `C=GB,ST=Yorks`.
pub fn normalize_spacing(dn: &str) -> String {
    dn.replace(" = ", "=").replace(", ", ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_six_plain_attributes() {
        let dn = DistinguishedName::split("C=GB,ST=Yorks,L=York,O=MyCompany Ltd.,OU=IT,CN=localhost");
        let pairs: Vec<(&str, &str)> = dn.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("C", "GB"),
                ("ST", "Yorks"),
                ("L", "York"),
                ("O", "MyCompany Ltd."),
                ("OU", "IT"),
                ("CN", "localhost"),
            ]
        );
    }

    #[test]
    fn slash_introduced_email_is_its_own_attribute() {
        let dn = DistinguishedName::split("C=GB,O=Acme,CN=localhost/emailAddress=test@example.com");
        assert_eq!(dn.get("CN"), Some("localhost"));
        assert_eq!(dn.get("emailAddress"), Some("test@example.com"));
        assert_eq!(dn.len(), 4);
    }

    #[test]
    fn slash_introduced_serial_and_unstructured_name() {
        let dn = DistinguishedName::split(
            "CN=router/serialNumber=FTX1234/unstructuredName=router.example.net",
        );
        assert_eq!(dn.get("CN"), Some("router"));
        assert_eq!(dn.get("serialNumber"), Some("FTX1234"));
        assert_eq!(dn.get("unstructuredName"), Some("router.example.net"));
    }

    #[test]
    fn values_keep_embedded_equals_signs() {
        let dn = DistinguishedName::split("CN=a=b=c,O=x");
        assert_eq!(dn.get("CN"), Some("a=b=c"));
        assert_eq!(dn.get("O"), Some("x"));
    }

    #[test]
    fn segments_without_equals_are_dropped() {
        let dn = DistinguishedName::split("O=Acme, Inc.,CN=shop");
        assert_eq!(dn.get("O"), Some("Acme"));
        assert_eq!(dn.get("CN"), Some("shop"));
        assert_eq!(dn.len(), 2);
        assert!(DistinguishedName::split("garbage").is_empty());
        assert!(DistinguishedName::split("").is_empty());
    }

    #[test]
    fn repeated_type_keeps_first_position_and_last_value() {
        let dn = DistinguishedName::split("OU=first,CN=x,OU=second");
        let pairs: Vec<(&str, &str)> = dn.iter().collect();
        assert_eq!(pairs, vec![("OU", "second"), ("CN", "x")]);
    }

    #[test]
    fn spacing_is_collapsed() {
        assert_eq!(
            normalize_spacing("C = GB, ST = Yorks, CN = localhost"),
            "C=GB,ST=Yorks,CN=localhost"
        );
        assert_eq!(normalize_spacing("C=GB, O=Acme"), "C=GB,O=Acme");
    }
}

use crate::core::context::{ModuleContext, RequestContext};
use crate::db::models::User;
use crate::db::types::IdentityField;

/// Which extra profile fields identify a user within a context.
pub trait IdentityFieldSource: Send + Sync {
    fn identity_fields(&self, context: &ModuleContext) -> Vec<IdentityField>;
}

/// Renders `user` through a `{firstname} {lastname}` style template.
pub fn full_name(user: &User, template: &str) -> String {
    let rendered =
        template.replace("{firstname}", user.firstname.trim()).replace("{lastname}", user.lastname.trim());
    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Ada Lovelace (ada@example.org, A123)`, or just the name when none of the
/// configured identity fields has a value.
pub fn format_user_identity(ctx: &RequestContext<'_>, user: &User, context: &ModuleContext) -> String {
    let name = full_name(user, &ctx.settings().site().fullname_display);
    let fields = ctx.identity_fields().identity_fields(context);
    with_identity_fields(name, user, &fields)
}

fn with_identity_fields(name: String, user: &User, fields: &[IdentityField]) -> String {
    let extra: Vec<&str> = fields
        .iter()
        .map(|field| user.identity_value(*field).trim())
        .filter(|value| !value.is_empty())
        .collect();

    if extra.is_empty() {
        name
    } else {
        format!("{name} ({})", extra.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: 4,
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            idnumber: "A123".to_string(),
            ..User::default()
        }
    }

    #[test]
    fn full_name_follows_template() {
        assert_eq!(full_name(&ada(), "{firstname} {lastname}"), "Ada Lovelace");
        assert_eq!(full_name(&ada(), "{lastname}, {firstname}"), "Lovelace, Ada");
    }

    #[test]
    fn full_name_collapses_missing_parts() {
        let user = User { firstname: "Ada".to_string(), ..User::default() };
        assert_eq!(full_name(&user, "{firstname} {lastname}"), "Ada");
    }

    #[test]
    fn identity_fields_keep_declared_order() {
        let fields = [IdentityField::Idnumber, IdentityField::Email];
        assert_eq!(
            with_identity_fields("Ada Lovelace".to_string(), &ada(), &fields),
            "Ada Lovelace (A123, ada@example.org)"
        );
    }

    #[test]
    fn empty_identity_fields_are_skipped() {
        let fields = [IdentityField::City, IdentityField::Email, IdentityField::Phone1];
        assert_eq!(
            with_identity_fields("Ada Lovelace".to_string(), &ada(), &fields),
            "Ada Lovelace (ada@example.org)"
        );
    }

    #[test]
    fn no_values_yields_plain_name() {
        let fields = [IdentityField::City, IdentityField::Department];
        assert_eq!(with_identity_fields("Ada Lovelace".to_string(), &ada(), &fields), "Ada Lovelace");
    }
}

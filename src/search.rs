use crate::model::User;

/// Users whose name or email contains `term`, ignoring case.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let q = term.to_lowercase();
    if q.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|u| {
            u.data.name.to_lowercase().contains(&q) || u.data.email.to_lowercase().contains(&q)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserData;

    fn mk_user(id: &str, name: &str, email: &str) -> User {
        User::new(
            id,
            UserData {
                name: name.to_string(),
                email: email.to_string(),
                ..UserData::default()
            },
        )
    }

    #[test]
    fn matches_name_case_insensitively() {
        let users = vec![mk_user("1", "Ann", "a@x.com"), mk_user("2", "Bob", "b@x.com")];
        let hits = filter_users(&users, "an");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].data.name, "Ann");
    }

    #[test]
    fn matches_email_and_keeps_order() {
        let users = vec![
            mk_user("1", "Zed", "zed@corp.io"),
            mk_user("2", "Amy", "amy@home.net"),
            mk_user("3", "Cy", "cy@CORP.io"),
        ];
        let ids: Vec<_> = filter_users(&users, "Corp").iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn empty_term_keeps_everyone() {
        let users = vec![mk_user("1", "Ann", "a@x.com"), mk_user("2", "Bob", "b@x.com")];
        assert_eq!(filter_users(&users, "").len(), 2);
    }

    #[test]
    fn special_characters_are_literal() {
        let users = vec![mk_user("1", "Ann", "a@x.com"), mk_user("2", "B.o.b", "b@x.com")];
        assert!(filter_users(&users, "[").is_empty());
        assert_eq!(filter_users(&users, "b.o")[0].id, "2");
    }
}

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::{CompanyId, ProjectId, ReportEntry, UserId};

/// Source of current hourly rates.
///
/// `None` means the user has no rate configured and earns nothing.
pub trait RateLookup {
    fn rate(&self, user_id: UserId) -> Option<Decimal>;
}

impl RateLookup for HashMap<UserId, Decimal> {
    fn rate(&self, user_id: UserId) -> Option<Decimal> {
        self.get(&user_id).copied()
    }
}

impl RateLookup for BTreeMap<UserId, Decimal> {
    fn rate(&self, user_id: UserId) -> Option<Decimal> {
        self.get(&user_id).copied()
    }
}

/// Hours and earnings of one user on one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEarnings {
    pub user_id: UserId,
    pub user_name: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub company_id: CompanyId,
    pub hours: Decimal,
    pub rate: Decimal,
    pub earnings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEarnings {
    pub user_id: UserId,
    pub user_name: String,
    pub hours: Decimal,
    pub rate: Decimal,
    pub earnings: Decimal,
}

/// Exact earnings for every user, project and company appearing in a set of
/// entries. Nothing here is rounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Earnings {
    pairs: BTreeMap<(UserId, ProjectId), PairEarnings>,
    users: BTreeMap<UserId, UserEarnings>,
    projects: BTreeMap<ProjectId, Decimal>,
    companies: BTreeMap<CompanyId, Decimal>,
    total: Decimal,
}

impl Earnings {
    pub fn calculate(entries: &[ReportEntry], rates: &impl RateLookup) -> Self {
        let mut resolved: HashMap<UserId, Decimal> = HashMap::new();
        let mut earnings = Self::default();

        for entry in entries {
            let rate = *resolved
                .entry(entry.user_id)
                .or_insert_with(|| rates.rate(entry.user_id).unwrap_or(Decimal::ZERO));
            let hours = entry.hours.value();
            let amount = hours * rate;

            let pair = earnings
                .pairs
                .entry((entry.user_id, entry.project_id))
                .or_insert_with(|| PairEarnings {
                    user_id: entry.user_id,
                    user_name: entry.user_name.clone(),
                    project_id: entry.project_id,
                    project_name: entry.project_name.clone(),
                    company_id: entry.company_id,
                    hours: Decimal::ZERO,
                    rate,
                    earnings: Decimal::ZERO,
                });
            pair.hours += hours;
            pair.earnings += amount;

            let user = earnings
                .users
                .entry(entry.user_id)
                .or_insert_with(|| UserEarnings {
                    user_id: entry.user_id,
                    user_name: entry.user_name.clone(),
                    hours: Decimal::ZERO,
                    rate,
                    earnings: Decimal::ZERO,
                });
            user.hours += hours;
            user.earnings += amount;

            *earnings.projects.entry(entry.project_id).or_default() += amount;
            *earnings.companies.entry(entry.company_id).or_default() += amount;
            earnings.total += amount;
        }

        tracing::trace!(users = resolved.len(), total = %earnings.total, "calculated earnings");

        earnings
    }

    /// Every (user, project) pair, ordered by user id then project id.
    pub fn pairs(&self) -> impl Iterator<Item = &PairEarnings> {
        self.pairs.values()
    }

    pub fn pair(&self, user_id: UserId, project_id: ProjectId) -> Option<&PairEarnings> {
        self.pairs.get(&(user_id, project_id))
    }

    /// Per-user totals ordered by user name.
    pub fn users(&self) -> Vec<&UserEarnings> {
        let mut users = self.users.values().collect::<Vec<_>>();
        users.sort_by(|a, b| (&a.user_name, a.user_id).cmp(&(&b.user_name, b.user_id)));
        users
    }

    pub fn user(&self, user_id: UserId) -> Option<&UserEarnings> {
        self.users.get(&user_id)
    }

    pub fn user_total(&self, user_id: UserId) -> Decimal {
        self.users
            .get(&user_id)
            .map_or(Decimal::ZERO, |user| user.earnings)
    }

    pub fn project_total(&self, project_id: ProjectId) -> Decimal {
        self.projects
            .get(&project_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn company_total(&self, company_id: CompanyId) -> Decimal {
        self.companies
            .get(&company_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::testing::{dec, entry};
    use time::macros::date;

    fn worked_example() -> Vec<ReportEntry> {
        let day = date!(2024 - 03 - 05);
        vec![
            entry(1, (1, "CompanyA"), (1, "Proj1"), (1, "U1"), day, "3.5"),
            entry(2, (1, "CompanyA"), (1, "Proj1"), (1, "U1"), day, "2.0"),
            entry(3, (1, "CompanyA"), (2, "Proj2"), (2, "U2"), day, "1.0"),
        ]
    }

    fn rates(pairs: &[(i32, &str)]) -> HashMap<UserId, Decimal> {
        pairs
            .iter()
            .map(|(id, rate)| (UserId::new(*id), dec(rate)))
            .collect()
    }

    /// Records every lookup it serves.
    struct CountingRates {
        inner: HashMap<UserId, Decimal>,
        calls: RefCell<Vec<UserId>>,
    }

    impl RateLookup for CountingRates {
        fn rate(&self, user_id: UserId) -> Option<Decimal> {
            self.calls.borrow_mut().push(user_id);
            self.inner.rate(user_id)
        }
    }

    #[test]
    fn worked_example_earnings() {
        let earnings = Earnings::calculate(&worked_example(), &rates(&[(1, "10"), (2, "20")]));

        assert_eq!(earnings.user_total(UserId::new(1)), dec("55"));
        assert_eq!(earnings.user_total(UserId::new(2)), dec("20"));
        assert_eq!(earnings.total(), dec("75"));
        assert_eq!(earnings.company_total(CompanyId::new(1)), dec("75"));
        assert_eq!(earnings.project_total(ProjectId::new(1)), dec("55"));
    }

    #[test]
    fn pairs_carry_hours_rate_and_earnings() {
        let earnings = Earnings::calculate(&worked_example(), &rates(&[(1, "10"), (2, "20")]));
        let pair = earnings.pair(UserId::new(1), ProjectId::new(1)).unwrap();

        assert_eq!(pair.hours, dec("5.5"));
        assert_eq!(pair.rate, dec("10"));
        assert_eq!(pair.earnings, dec("55"));
        assert_eq!(earnings.pairs().count(), 2);
    }

    #[test]
    fn missing_rate_earns_nothing_but_keeps_hours() {
        let earnings = Earnings::calculate(&worked_example(), &rates(&[(1, "10")]));
        let user = earnings.user(UserId::new(2)).unwrap();

        assert_eq!(user.hours, dec("1.0"));
        assert_eq!(user.earnings, Decimal::ZERO);
        assert_eq!(earnings.total(), dec("55"));
    }

    #[test]
    fn each_user_rate_is_resolved_once() {
        let lookup = CountingRates {
            inner: rates(&[(1, "10"), (2, "20")]),
            calls: RefCell::new(Vec::new()),
        };

        Earnings::calculate(&worked_example(), &lookup);

        let mut calls = lookup.calls.into_inner();
        calls.sort();
        assert_eq!(calls, vec![UserId::new(1), UserId::new(2)]);
    }

    #[test]
    fn fractional_rates_stay_exact() {
        let day = date!(2024 - 03 - 05);
        let entries = (0..3)
            .map(|i| entry(i, (1, "Acme"), (1, "Web"), (1, "Ann"), day, "0.33"))
            .collect::<Vec<_>>();

        let earnings = Earnings::calculate(&entries, &rates(&[(1, "33.33")]));
        assert_eq!(earnings.total(), dec("32.9967"));
    }

    #[test]
    fn earnings_are_additive() {
        let day = date!(2024 - 03 - 05);
        let entries = vec![
            entry(1, (1, "Acme"), (1, "Web"), (1, "Ann"), day, "1.25"),
            entry(2, (1, "Acme"), (2, "App"), (1, "Ann"), day, "2.75"),
            entry(3, (2, "Zeta"), (3, "Ops"), (2, "Bea"), day, "0.5"),
            entry(4, (2, "Zeta"), (3, "Ops"), (1, "Ann"), day, "3"),
        ];
        let earnings = Earnings::calculate(&entries, &rates(&[(1, "12.5"), (2, "99.99")]));

        for user in earnings.users() {
            let per_project: Decimal = earnings
                .pairs()
                .filter(|pair| pair.user_id == user.user_id)
                .map(|pair| pair.earnings)
                .sum();
            assert_eq!(per_project, user.earnings);
        }

        let per_user: Decimal = earnings.users().iter().map(|user| user.earnings).sum();
        assert_eq!(per_user, earnings.total());

        let per_company = earnings.company_total(CompanyId::new(1))
            + earnings.company_total(CompanyId::new(2));
        assert_eq!(per_company, earnings.total());
    }

    #[test]
    fn users_are_listed_by_name() {
        let day = date!(2024 - 03 - 05);
        let entries = vec![
            entry(1, (1, "Acme"), (1, "Web"), (1, "Zoe"), day, "1"),
            entry(2, (1, "Acme"), (1, "Web"), (2, "Adam"), day, "1"),
        ];
        let earnings = Earnings::calculate(&entries, &HashMap::<UserId, Decimal>::new());
        let names = earnings
            .users()
            .into_iter()
            .map(|user| user.user_name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Adam", "Zoe"]);
    }
}

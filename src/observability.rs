use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("finsight.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("finsight.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("finsight.client.request_duration_seconds");

pub(crate) static QUESTIONS_SUBMITTED: Counter = Counter::new("finsight.questions.submitted");
pub(crate) static QUESTIONS_REJECTED: Counter = Counter::new("finsight.questions.rejected");
pub(crate) static QUESTIONS_ANSWERED: Counter = Counter::new("finsight.questions.answered");
pub(crate) static QUESTIONS_FAILED: Counter = Counter::new("finsight.questions.failed");

pub(crate) static NEWS_FETCHES: Counter = Counter::new("finsight.news.fetches");
pub(crate) static NEWS_FAILURES: Counter = Counter::new("finsight.news.failures");
pub(crate) static NEWS_ARTICLES: Moments = Moments::new("finsight.news.articles");

pub(crate) static HISTORY_CLEARS: Counter = Counter::new("finsight.history.clears");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&QUESTIONS_SUBMITTED);
    collector.register_counter(&QUESTIONS_REJECTED);
    collector.register_counter(&QUESTIONS_ANSWERED);
    collector.register_counter(&QUESTIONS_FAILED);

    collector.register_counter(&NEWS_FETCHES);
    collector.register_counter(&NEWS_FAILURES);
    collector.register_moments(&NEWS_ARTICLES);

    collector.register_counter(&HISTORY_CLEARS);
}

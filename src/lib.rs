//! Движок живых покерных сессий: несколько мест (люди и боты) за столом,
//! раунды с блайндами, круги ставок, шоудаун, выбывание и ротация дилера.
//!
//! Слои:
//! - `domain` — карты, фишки, игроки, состояние сессии;
//! - `engine` — машина состояний раунда и реестр столов;
//! - `eval` — оценка силы рук;
//! - `infra` — RNG, колода, боты, шоудаун по умолчанию;
//! - `time_ctrl` — таймаут хода человека;
//! - `api` — команды и события на проводе;
//! - `host` — tokio-хост: один таск на стол.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod host;
pub mod infra;
pub mod time_ctrl;

pub mod entity_prober;

pub mod caster;

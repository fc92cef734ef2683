crate::reexport!(affinity);
crate::reexport!(naming);
crate::reexport!(column);
crate::reexport!(foreign_key);
crate::reexport!(table);
crate::reexport!(database);

use itertools::Itertools;
use serde::Serialize;
